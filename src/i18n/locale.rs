//! Validated locale handle.
//!
//! A `Locale` can only be constructed for a code that exists in the
//! registry and is enabled, so downstream code never has to re-check
//! whether a locale is supported.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO 639-1 locale code (e.g., "fr", "en")
    code: &'static str,
}

impl Locale {
    /// French, the site default.
    pub const FRENCH: Locale = Locale { code: "fr" };

    /// English.
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// Create a Locale from a locale code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is known and the locale is enabled
    /// * `Err` otherwise
    pub fn from_code(code: &str) -> Result<Locale> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            Some(_) => bail!("Locale '{}' is not enabled", code),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// The site-wide default locale (French).
    pub fn default_locale() -> Locale {
        let config = LocaleRegistry::get().default_locale();
        Locale { code: config.code }
    }

    /// The ISO 639-1 locale code ("fr", "en").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full registry configuration for this locale.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Locale` obtained through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// English name of the locale ("French", "English").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the locale ("Français", "English").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// BCP 47 tag used in `<html lang>` and date formatting.
    pub fn bcp47(&self) -> &'static str {
        self.config().bcp47
    }

    /// Whether this is the default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::default_locale()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_french_constant() {
        let french = Locale::FRENCH;
        assert_eq!(french.code(), "fr");
        assert_eq!(french.name(), "French");
        assert!(french.is_default());
    }

    #[test]
    fn test_english_constant() {
        let english = Locale::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(!english.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_supported() {
        assert_eq!(Locale::from_code("fr").unwrap(), Locale::FRENCH);
        assert_eq!(Locale::from_code("en").unwrap(), Locale::ENGLISH);
    }

    #[test]
    fn test_from_code_unknown() {
        let result = Locale::from_code("de");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Locale::from_code("").is_err());
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        // Codes are normalized to lowercase before reaching this point.
        assert!(Locale::from_code("FR").is_err());
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_locale_is_french() {
        assert_eq!(Locale::default_locale(), Locale::FRENCH);
        assert_eq!(Locale::default(), Locale::FRENCH);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_locale_equality() {
        assert_eq!(Locale::FRENCH, Locale::from_code("fr").unwrap());
        assert_ne!(Locale::FRENCH, Locale::ENGLISH);
    }

    #[test]
    fn test_locale_copy() {
        let locale = Locale::ENGLISH;
        let copied = locale;
        assert_eq!(locale, copied);
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::FRENCH.to_string(), "fr");
        assert_eq!(format!("{}", Locale::ENGLISH), "en");
    }

    #[test]
    fn test_config_access() {
        let config = Locale::FRENCH.config();
        assert_eq!(config.code, "fr");
        assert_eq!(config.bcp47, "fr-FR");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Locale::FRENCH.native_name(), "Français");
        assert_eq!(Locale::ENGLISH.native_name(), "English");
    }
}
