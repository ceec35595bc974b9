//! Translation catalog: dot-path lookup into per-locale documents.
//!
//! One JSON document per locale is compiled into the binary and parsed once
//! at first use. Lookup never fails: a key that cannot be resolved in the
//! requested locale is retried against the default locale's document, and
//! if that also fails the key itself is returned so the page renders the
//! raw key instead of crashing.

use crate::i18n::{Locale, TranslationMetrics};
use serde_json::Value;
use std::sync::OnceLock;

const FRENCH_DOCUMENT: &str = include_str!("../../locales/fr/common.json");
const ENGLISH_DOCUMENT: &str = include_str!("../../locales/en/common.json");

static CATALOG: OnceLock<TranslationCatalog> = OnceLock::new();

/// Access the global catalog, parsing the embedded documents on first use.
///
/// # Panics
/// Panics if an embedded locale document is not valid JSON. The documents
/// ship inside the binary, so this is a build defect, not a runtime input.
pub fn catalog() -> &'static TranslationCatalog {
    CATALOG.get_or_init(|| {
        TranslationCatalog::from_documents(vec![
            (
                "fr",
                serde_json::from_str(FRENCH_DOCUMENT)
                    .expect("locales/fr/common.json is valid JSON"),
            ),
            (
                "en",
                serde_json::from_str(ENGLISH_DOCUMENT)
                    .expect("locales/en/common.json is valid JSON"),
            ),
        ])
    })
}

/// Look up a translation in the global catalog.
///
/// Shorthand for `catalog().lookup(locale, key)`.
pub fn translate(locale: Locale, key: &str) -> String {
    catalog().lookup(locale, key)
}

/// Immutable per-locale translation documents.
pub struct TranslationCatalog {
    /// locale code -> nested JSON document
    documents: Vec<(&'static str, Value)>,
}

impl TranslationCatalog {
    /// Build a catalog from pre-parsed documents. The loader and the tests
    /// share this constructor.
    pub fn from_documents(documents: Vec<(&'static str, Value)>) -> Self {
        Self { documents }
    }

    /// Resolve `key` ("footer.copyright") for `locale`.
    ///
    /// Fallback chain: requested locale -> default locale -> the key itself.
    /// A terminal value that is not a string counts as unresolved.
    pub fn lookup(&self, locale: Locale, key: &str) -> String {
        let metrics = TranslationMetrics::global();

        if let Some(value) = self.resolve(locale.code(), key) {
            metrics.record_hit();
            return value.to_string();
        }

        let default_code = Locale::default_locale().code();
        if default_code != locale.code() {
            if let Some(value) = self.resolve(default_code, key) {
                metrics.record_fallback();
                return value.to_string();
            }
        }

        metrics.record_miss();
        tracing::debug!("No translation for key '{}' (locale {})", key, locale);
        key.to_string()
    }

    /// The document registered for a locale code, if any.
    pub fn document(&self, code: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|(document_code, _)| *document_code == code)
            .map(|(_, document)| document)
    }

    /// Locale codes that have a document loaded.
    pub fn codes(&self) -> Vec<&'static str> {
        self.documents.iter().map(|(code, _)| *code).collect()
    }

    fn resolve(&self, code: &str, key: &str) -> Option<&str> {
        let mut current = self.document(code)?;
        for segment in key.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        current.as_str()
    }
}
