// ABOUTME: Record text formatters and lenient numeric parsing
// ABOUTME: Produces and re-reads the display strings persisted in running records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Formatters for the text fields persisted in [`RunningRecord`]s and
//! the lenient numeric parser the aggregator uses to read them back.
//!
//! Records store display text, not numbers, so older entries (hand
//! edited, produced by previous versions, or localized) may carry unit
//! suffixes or stray characters. [`parse_lenient_f64`] strips anything
//! that is not part of a decimal number and falls back to `None`,
//! which aggregation coerces to 0.
//!
//! [`RunningRecord`]: crate::models::RunningRecord

/// Format elapsed seconds as zero-padded total-minutes `MM:SS`.
///
/// Minutes are not wrapped at the hour: a 75-minute session renders
/// as `75:00`. [`crate::duration::parse_hours`] accepts this form.
#[must_use]
pub fn format_duration(elapsed_seconds: u64) -> String {
    let minutes = elapsed_seconds / 60;
    let seconds = elapsed_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a distance as `X.XXkm`
#[must_use]
pub fn format_distance_km(distance_km: f64) -> String {
    format!("{distance_km:.2}km")
}

/// Format an energy value as bare integer kcal text
#[must_use]
pub fn format_kcal(kcal: u32) -> String {
    kcal.to_string()
}

/// Parse a number out of free-form text, tolerating unit suffixes and
/// stray characters (`"0.11km"` → 0.11, `"117"` → 117.0).
///
/// Returns `None` when no digits survive the strip; callers decide
/// whether that is 0 (aggregation) or worth reporting.
#[must_use]
pub fn parse_lenient_f64(text: &str) -> Option<f64> {
    let mut cleaned = String::with_capacity(text.len());
    for (i, ch) in text.trim().char_indices() {
        if ch.is_ascii_digit() || ch == '.' || (ch == '-' && i == 0) {
            cleaned.push(ch);
        } else if !cleaned.is_empty() && cleaned.chars().any(|c| c.is_ascii_digit()) {
            // First run of digits wins: "1.2km 3m" reads as 1.2.
            break;
        } else {
            cleaned.clear();
        }
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_pads_and_exceeds_hour() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(605), "10:05");
        assert_eq!(format_duration(4500), "75:00");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance_km(0.111_19), "0.11km");
        assert_eq!(format_distance_km(5.0), "5.00km");
    }

    #[test]
    fn test_parse_lenient_strips_units() {
        assert_eq!(parse_lenient_f64("0.11km"), Some(0.11));
        assert_eq!(parse_lenient_f64("117"), Some(117.0));
        assert_eq!(parse_lenient_f64("  3.5 km  "), Some(3.5));
        assert_eq!(parse_lenient_f64("approx 42kcal"), Some(42.0));
    }

    #[test]
    fn test_parse_lenient_rejects_garbage() {
        assert_eq!(parse_lenient_f64(""), None);
        assert_eq!(parse_lenient_f64("n/a"), None);
        assert_eq!(parse_lenient_f64("..."), None);
    }
}
