//! Internationalization (i18n) module for the bilingual site.
//!
//! Everything locale-related lives here: the supported locale set, the
//! request-to-locale negotiation, the translation catalog with its fallback
//! chain, date formatting, and the observability/QA tooling around the
//! catalog.
//!
//! # Architecture
//!
//! - `registry`: single source of truth for the supported locales (fr, en)
//! - `locale`: validated `Locale` handle over the registry
//! - `negotiation`: Accept-Language parsing and path-prefix matching
//! - `catalog`: embedded per-locale documents with dot-path lookup
//! - `format`: locale-aware date formatting
//! - `metrics`: lookup hit/fallback/miss counters
//! - `validator`: cross-locale catalog QA
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{self, Locale};
//!
//! let locale = i18n::resolve_locale(Some("en-US,fr;q=0.9"));
//! assert_eq!(locale, Locale::ENGLISH);
//! let label = i18n::translate(locale, "footer.allStories");
//! ```

mod catalog;
mod format;
mod locale;
mod metrics;
mod negotiation;
mod registry;
mod validator;

pub use catalog::{catalog, translate, TranslationCatalog};
pub use format::{format_date, format_timestamp};
pub use locale::Locale;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use negotiation::{path_locale, resolve_locale};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use validator::{CatalogValidator, ValidationReport};
