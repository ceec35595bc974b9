//! Catalog quality validation.
//!
//! The lookup fallback chain hides missing translations at runtime, so the
//! validator surfaces them ahead of time: it diffs the key sets of every
//! locale document against the default locale and flags leaves that are
//! not strings or are empty. Run from the `check-translations` bin and the
//! test suite.

use crate::i18n::{LocaleRegistry, TranslationCatalog};
use serde_json::Value;
use std::collections::BTreeSet;

/// Validation report containing errors and warnings about the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems that will render raw keys in production
    pub errors: Vec<String>,

    /// Issues worth fixing that the fallback chain papers over
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for the translation catalog.
pub struct CatalogValidator;

impl CatalogValidator {
    /// Validate a catalog against the locale registry.
    ///
    /// Checks that:
    /// - every enabled locale has a document
    /// - every locale document covers the default locale's key set
    ///   (a key missing from the default document is an error, because
    ///   the fallback chain ends there)
    /// - every leaf is a non-empty string
    pub fn validate(catalog: &TranslationCatalog) -> ValidationReport {
        let mut report = ValidationReport::new();
        let registry = LocaleRegistry::get();
        let default_code = registry.default_locale().code;

        let default_keys = match catalog.document(default_code) {
            Some(document) => Self::collect_keys(document),
            None => {
                report
                    .errors
                    .push(format!("No document loaded for default locale '{default_code}'"));
                return report;
            }
        };

        for locale in registry.list_enabled() {
            let Some(document) = catalog.document(locale.code) else {
                report
                    .errors
                    .push(format!("No document loaded for locale '{}'", locale.code));
                continue;
            };

            let keys = Self::collect_keys(document);

            for missing in default_keys.difference(&keys) {
                report.warnings.push(format!(
                    "Locale '{}' is missing key '{}' (will fall back to '{}')",
                    locale.code, missing, default_code
                ));
            }

            for extra in keys.difference(&default_keys) {
                report.errors.push(format!(
                    "Locale '{}' has key '{}' with no counterpart in default locale '{}'",
                    locale.code, extra, default_code
                ));
            }

            Self::check_leaves("", document, locale.code, &mut report);
        }

        report
    }

    /// Collect all dot-path keys whose terminal value is a string.
    fn collect_keys(document: &Value) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        Self::collect_keys_into("", document, &mut keys);
        keys
    }

    fn collect_keys_into(prefix: &str, value: &Value, keys: &mut BTreeSet<String>) {
        match value {
            Value::Object(map) => {
                for (segment, child) in map {
                    let path = if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{prefix}.{segment}")
                    };
                    Self::collect_keys_into(&path, child, keys);
                }
            }
            Value::String(_) => {
                keys.insert(prefix.to_string());
            }
            _ => {}
        }
    }

    fn check_leaves(prefix: &str, value: &Value, code: &str, report: &mut ValidationReport) {
        match value {
            Value::Object(map) => {
                for (segment, child) in map {
                    let path = if prefix.is_empty() {
                        segment.clone()
                    } else {
                        format!("{prefix}.{segment}")
                    };
                    Self::check_leaves(&path, child, code, report);
                }
            }
            Value::String(text) => {
                if text.trim().is_empty() {
                    report
                        .warnings
                        .push(format!("Locale '{code}' has empty value at key '{prefix}'"));
                }
            }
            other => {
                report.errors.push(format!(
                    "Locale '{code}' has non-string value at key '{prefix}': {other}"
                ));
            }
        }
    }
}
