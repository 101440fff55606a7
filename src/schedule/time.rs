//! Start time parsing shared by the filter and the hour buckets.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})").expect("valid time pattern"));

/// Minutes since midnight of a leading `H:MM` / `HH:MM`.
///
/// Anything after the match is ignored (`"09:05-10:00"` parses).
/// Returns `None` for other shapes and for out-of-range clock values.
pub fn parse_start_minutes(value: &str) -> Option<u16> {
    let caps = LEADING_TIME.captures(value)?;
    let hours: u16 = caps[1].parse().ok()?;
    let minutes: u16 = caps[2].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// `HH:MM` for minutes since midnight.
pub fn format_minutes(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Hour bucket of a start time.
pub fn hour_of(minutes: u16) -> u8 {
    (minutes / 60) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_hour_widths_parse() {
        assert_eq!(parse_start_minutes("09:05"), Some(545));
        assert_eq!(parse_start_minutes("9:05"), Some(545));
        assert_eq!(parse_start_minutes("0:00"), Some(0));
        assert_eq!(parse_start_minutes("23:59"), Some(1439));
    }

    #[test]
    fn malformed_values_are_unparsable() {
        for value in ["9:5", "abc", "", " 09:00", "9.05", "123:45", "24:00", "12:60"] {
            assert_eq!(parse_start_minutes(value), None, "value {value:?}");
        }
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_start_minutes("18:30 - 19:30"), Some(1110));
        assert_eq!(parse_start_minutes("07:45 Uhr"), Some(465));
    }

    #[test]
    fn formats_and_buckets() {
        assert_eq!(format_minutes(545), "09:05");
        assert_eq!(format_minutes(0), "00:00");
        assert_eq!(hour_of(545), 9);
        assert_eq!(hour_of(1439), 23);
    }
}
