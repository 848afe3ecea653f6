// ABOUTME: Free-form duration text parsing into fractional hours
// ABOUTME: Accepts stopwatch colon forms, localized unit markers, and bare minute counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Duration text parsing for historical records.
//!
//! Duration text in stored records is inconsistently formatted:
//! stopwatch-style (`45:00`, `1:05:00`), natural language with
//! localized unit markers (`30분`, `1시간 5분`, `45 min`), or bare
//! numbers from older versions (`45`, meaning minutes). Aggregate
//! statistics must tolerate all of them without zeroing valid entries.
//!
//! [`parse`] keeps the parsed/unparseable distinction as an `Option`;
//! [`parse_hours`] is the coercing form used by aggregation, mapping
//! unparseable text to 0 hours.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const MINUTES_PER_HOUR: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Unit markers recognized in free text, longest alternative first so
/// `hours` wins over `h` at the same position.
const HOUR_MARKERS: &str = r"시간|hours?|hrs?|h";
const MINUTE_MARKERS: &str = r"분|minutes?|mins?|m";
const SECOND_MARKERS: &str = r"초|seconds?|secs?|s";

fn marker_regex(cell: &'static OnceLock<Option<Regex>>, markers: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(&format!(r"(?i)(\d+(?:\.\d+)?)\s*(?:{markers})")).ok())
        .as_ref()
}

fn hour_regex() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    marker_regex(&CELL, HOUR_MARKERS)
}

fn minute_regex() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    marker_regex(&CELL, MINUTE_MARKERS)
}

fn second_regex() -> Option<&'static Regex> {
    static CELL: OnceLock<Option<Regex>> = OnceLock::new();
    marker_regex(&CELL, SECOND_MARKERS)
}

/// Parse duration text into fractional hours.
///
/// Recognized forms, tried in order:
/// 1. Colon-delimited with 2 or 3 numeric groups: `MM:SS` or `H:MM:SS`.
/// 2. Free text with hour/minute/second unit markers, each optional
///    and summed: `1시간 5분`, `30분`, `45 min 10 sec`.
/// 3. A bare number, interpreted as **minutes**: `45` is 0.75 hours.
///
/// Returns `None` for anything else; use [`parse_hours`] to coerce
/// that to 0.
#[must_use]
pub fn parse(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(hours) = parse_colon_form(text) {
        return Some(hours);
    }
    if let Some(hours) = parse_marker_form(text) {
        return Some(hours);
    }
    parse_bare_minutes(text)
}

/// Parse duration text into fractional hours, coercing unparseable
/// input to 0. Never fails.
#[must_use]
pub fn parse_hours(text: &str) -> f64 {
    parse(text).unwrap_or_else(|| {
        if !text.trim().is_empty() {
            debug!(text, "unparseable duration text, counting as 0 hours");
        }
        0.0
    })
}

/// `MM:SS` or `H:MM:SS`. Minutes in the two-group form may exceed 59,
/// matching the formatter's total-minutes output (`75:00`).
fn parse_colon_form(text: &str) -> Option<f64> {
    let groups: Vec<&str> = text.split(':').collect();
    if !(2..=3).contains(&groups.len()) {
        return None;
    }
    let mut values = Vec::with_capacity(groups.len());
    for group in &groups {
        values.push(group.trim().parse::<u64>().ok()?);
    }
    let (hours, minutes, seconds) = match values[..] {
        [m, s] => (0, m, s),
        [h, m, s] => (h, m, s),
        _ => return None,
    };
    Some(
        (hours as f64)
            + (minutes as f64) / MINUTES_PER_HOUR
            + (seconds as f64) / SECONDS_PER_HOUR,
    )
}

/// Sum every `<number><unit>` occurrence; `None` when no marker matched.
fn parse_marker_form(text: &str) -> Option<f64> {
    let mut total = 0.0;
    let mut matched = false;

    let scales: [(Option<&Regex>, f64); 3] = [
        (hour_regex(), 1.0),
        (minute_regex(), 1.0 / MINUTES_PER_HOUR),
        (second_regex(), 1.0 / SECONDS_PER_HOUR),
    ];
    for (regex, scale) in scales {
        let Some(regex) = regex else { continue };
        for capture in regex.captures_iter(text) {
            if let Some(value) = capture.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
                total += value * scale;
                matched = true;
            }
        }
    }

    matched.then_some(total)
}

/// A bare integer or decimal with no unit is minutes.
fn parse_bare_minutes(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|minutes| minutes / MINUTES_PER_HOUR)
}
