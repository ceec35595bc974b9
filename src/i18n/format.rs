//! Locale-aware date formatting.
//!
//! Article cards and pages show publication dates in the short-month style
//! of the reader's locale: "Jan 15, 2026" for English, "15 janv. 2026" for
//! French. The month tables are fixed data; no system locale is consulted.

use crate::i18n::Locale;
use chrono::{DateTime, Datelike, Utc};

/// Abbreviated month names, index 0 = January.
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// French abbreviations follow the fr-FR convention (mars, mai, juin and
/// août are not abbreviated).
const MONTHS_FR: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Format a date in the short style of the given locale.
pub fn format_date(date: DateTime<Utc>, locale: Locale) -> String {
    let month_index = date.month0() as usize;
    if locale == Locale::FRENCH {
        format!("{} {} {}", date.day(), MONTHS_FR[month_index], date.year())
    } else {
        format!("{} {}, {}", MONTHS_EN[month_index], date.day(), date.year())
    }
}

/// Parse an RFC 3339 timestamp (the CMS wire format) and format it for the
/// locale. Returns `None` when the timestamp does not parse; callers render
/// a localized placeholder instead.
pub fn format_timestamp(timestamp: &str, locale: Locale) -> Option<String> {
    let date = DateTime::parse_from_rfc3339(timestamp).ok()?;
    Some(format_date(date.with_timezone(&Utc), locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_date_english() {
        assert_eq!(format_date(date(2026, 1, 15), Locale::ENGLISH), "Jan 15, 2026");
        assert_eq!(format_date(date(2026, 12, 1), Locale::ENGLISH), "Dec 1, 2026");
    }

    #[test]
    fn test_format_date_french() {
        assert_eq!(format_date(date(2026, 1, 15), Locale::FRENCH), "15 janv. 2026");
        assert_eq!(format_date(date(2026, 8, 3), Locale::FRENCH), "3 août 2026");
    }

    #[test]
    fn test_format_date_unabbreviated_french_months() {
        assert_eq!(format_date(date(2026, 3, 2), Locale::FRENCH), "2 mars 2026");
        assert_eq!(format_date(date(2026, 5, 9), Locale::FRENCH), "9 mai 2026");
        assert_eq!(format_date(date(2026, 6, 21), Locale::FRENCH), "21 juin 2026");
    }

    #[test]
    fn test_format_timestamp_valid() {
        assert_eq!(
            format_timestamp("2026-02-28T09:30:00Z", Locale::ENGLISH),
            Some("Feb 28, 2026".to_string())
        );
        assert_eq!(
            format_timestamp("2026-02-28T09:30:00+01:00", Locale::FRENCH),
            Some("28 févr. 2026".to_string())
        );
    }

    #[test]
    fn test_format_timestamp_converts_to_utc() {
        // 23:30 -05:00 is already the next day in UTC.
        assert_eq!(
            format_timestamp("2026-02-28T23:30:00-05:00", Locale::ENGLISH),
            Some("Mar 1, 2026".to_string())
        );
    }

    #[test]
    fn test_format_timestamp_invalid() {
        assert_eq!(format_timestamp("not a date", Locale::FRENCH), None);
        assert_eq!(format_timestamp("", Locale::ENGLISH), None);
    }
}
