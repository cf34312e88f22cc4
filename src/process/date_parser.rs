use chrono::{NaiveDate, NaiveDateTime};

use super::utils::clean_str;

/// Day-first (es-CO) layouts first, then the ISO layouts spreadsheet exports use.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];

/// Rendering used by every derived dataset.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a survey timestamp into a naive local datetime. Date-only values
/// land on midnight.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = clean_str(s);
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}
