//! Locale negotiation: the one place where a request is mapped to a locale.
//!
//! Two pure functions cover both call sites (the redirect middleware and
//! anything that only has a header value):
//!
//! - [`resolve_locale`] picks a supported locale from an `Accept-Language`
//!   header value, defaulting to French.
//! - [`path_locale`] recognizes a supported locale carried as the first
//!   path segment (`/fr`, `/en/posts`, ...).
//!
//! Header parsing follows the browser convention: entries are comma
//! separated, an optional `;q=` weight is stripped, and only the primary
//! subtag matters (`en-US` counts as `en`). Weights are not compared; the
//! first supported entry in header order wins.

use crate::i18n::{Locale, LocaleRegistry};

/// Resolve a single supported locale from an `Accept-Language` header value.
///
/// Returns the default locale when the header is absent, malformed, or
/// contains no supported primary subtag. Never fails.
pub fn resolve_locale(header: Option<&str>) -> Locale {
    let Some(header) = header else {
        return Locale::default_locale();
    };

    let registry = LocaleRegistry::get();

    for entry in header.split(',') {
        // "fr-CA;q=0.8" -> "fr-CA" -> "fr"
        let tag = entry.split(';').next().unwrap_or(entry).trim();
        if tag.is_empty() {
            continue;
        }

        let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
        if registry.is_enabled(&primary) {
            // from_code cannot fail for an enabled registry code
            return Locale::from_code(&primary).unwrap_or_default();
        }
    }

    Locale::default_locale()
}

/// Return the supported locale carried by the first path segment, if any.
///
/// Matches `/fr` and `/fr/...` but not `/french` or `/`.
pub fn path_locale(path: &str) -> Option<Locale> {
    let first_segment = path.strip_prefix('/')?.split('/').next()?;
    if LocaleRegistry::get().is_enabled(first_segment) {
        Locale::from_code(first_segment).ok()
    } else {
        None
    }
}
