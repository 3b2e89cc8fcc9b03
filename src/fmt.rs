//! Display formatting for stored metric values.
//!
//! Stored values are always `i64`; these helpers turn the reported value of a
//! metric into the string shown to operators and rule messages. They are pure
//! and accept any `i64`, including zero, negatives and `i64::MAX`.

use serde::{Deserialize, Serialize};

/// Bytes in one megabyte, the divisor used by [`format_megabytes`].
const MEGABYTE: f64 = 1024.0 * 1024.0;

/// Display strategy attached to a metric at declaration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// `"42%"`
    Percent,
    /// Fixed-point hundredths: `235` -> `"2.35"`.
    Hundredths,
    /// Byte count in megabytes: `"1.50m"`.
    Megabytes,
    /// Plain decimal integer.
    Plain,
}

impl Format {
    /// Formats a reported value with this strategy.
    pub fn apply(self, value: i64) -> String {
        match self {
            Format::Percent => format_percent(value),
            Format::Hundredths => format_hundredths(value),
            Format::Megabytes => format_megabytes(value),
            Format::Plain => format_plain(value),
        }
    }
}

/// Format value as a whole percentage.
///
/// `50` -> `"50%"`
pub fn format_percent(value: i64) -> String {
    format!("{}%", value)
}

/// Format a value stored in hundredths with two decimals.
///
/// `235` -> `"2.35"`, `5` -> `"0.05"`
pub fn format_hundredths(value: i64) -> String {
    format!("{:.2}", value as f64 / 100.0)
}

/// Format a byte count as megabytes with two decimals and an `m` suffix.
///
/// `1572864` -> `"1.50m"`
pub fn format_megabytes(value: i64) -> String {
    format!("{:.2}m", value as f64 / MEGABYTE)
}

pub fn format_plain(value: i64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0), "0%");
        assert_eq!(format_percent(50), "50%");
        assert_eq!(format_percent(100), "100%");
        assert_eq!(format_percent(-3), "-3%");
    }

    #[test]
    fn test_format_hundredths() {
        assert_eq!(format_hundredths(0), "0.00");
        assert_eq!(format_hundredths(5), "0.05");
        assert_eq!(format_hundredths(50), "0.50");
        assert_eq!(format_hundredths(235), "2.35");
        assert_eq!(format_hundredths(1200), "12.00");
    }

    #[test]
    fn test_format_megabytes() {
        assert_eq!(format_megabytes(0), "0.00m");
        assert_eq!(format_megabytes(1024 * 1024), "1.00m");
        assert_eq!(format_megabytes(1024 * 1024 * 3 / 2), "1.50m");
    }

    #[test]
    fn test_formatters_handle_extremes() {
        // Must not panic; exact text for huge values is float-dependent.
        assert!(format_megabytes(i64::MAX).ends_with('m'));
        assert!(!format_hundredths(i64::MAX).is_empty());
        assert_eq!(format_percent(i64::MAX), format!("{}%", i64::MAX));
    }

    #[test]
    fn test_format_apply_dispatch() {
        assert_eq!(Format::Percent.apply(7), "7%");
        assert_eq!(Format::Hundredths.apply(120), "1.20");
        assert_eq!(Format::Megabytes.apply(2 * 1024 * 1024), "2.00m");
        assert_eq!(Format::Plain.apply(-12), "-12");
    }
}
