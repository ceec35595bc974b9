//! Locale registry: single source of truth for the supported locales.
//!
//! The site is bilingual by construction: French is the default locale and
//! English the second. The registry keeps the per-locale metadata in one
//! place behind a `OnceLock` so every call site agrees on the same set.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 locale code (e.g., "fr", "en")
    pub code: &'static str,

    /// English name of the locale (e.g., "French", "English")
    pub name: &'static str,

    /// Native name of the locale (e.g., "Français", "English")
    pub native_name: &'static str,

    /// BCP 47 region tag used for date formatting (e.g., "fr-FR", "en-US")
    pub bcp47: &'static str,

    /// Whether this is the site-wide default locale (exactly one must be true)
    pub is_default: bool,

    /// Whether this locale is enabled for use
    pub enabled: bool,
}

/// Global locale registry.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All enabled locales, default locale first.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if no default locale is found or if multiple defaults are
    /// defined (this indicates a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// The fixed locale set: French (default) and English.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            bcp47: "fr-FR",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            bcp47: "en-US",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_french() {
        let config = LocaleRegistry::get().get_by_code("fr").unwrap();

        assert_eq!(config.code, "fr");
        assert_eq!(config.name, "French");
        assert_eq!(config.native_name, "Français");
        assert!(config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LocaleRegistry::get().get_by_code("en").unwrap();

        assert_eq!(config.code, "en");
        assert_eq!(config.bcp47, "en-US");
        assert!(!config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LocaleRegistry::get().get_by_code("de").is_none());
    }

    #[test]
    fn test_list_enabled_contains_both_locales() {
        let enabled = LocaleRegistry::get().list_enabled();

        assert_eq!(enabled.len(), 2);
        assert!(enabled.iter().any(|locale| locale.code == "fr"));
        assert!(enabled.iter().any(|locale| locale.code == "en"));
    }

    #[test]
    fn test_default_locale_is_french() {
        let default = LocaleRegistry::get().default_locale();

        assert_eq!(default.code, "fr");
        assert!(default.is_default);
    }

    #[test]
    fn test_is_enabled() {
        let registry = LocaleRegistry::get();

        assert!(registry.is_enabled("fr"));
        assert!(registry.is_enabled("en"));
        assert!(!registry.is_enabled("es"));
        assert!(!registry.is_enabled(""));
    }
}
