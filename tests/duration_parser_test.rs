// ABOUTME: Tests for free-form duration text parsing
// ABOUTME: Covers colon forms, localized unit markers, bare minutes, and the zero fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use packwalk::core::duration::{parse, parse_hours};

fn assert_hours(text: &str, expected: f64) {
    let actual = parse_hours(text);
    assert!(
        (actual - expected).abs() < 1e-9,
        "parse_hours({text:?}) = {actual}, expected {expected}"
    );
}

#[test]
fn test_stopwatch_minute_second_form() {
    assert_hours("45:00", 0.75);
    assert_hours("00:30", 30.0 / 3600.0);
    // The formatter emits total minutes, which may exceed an hour.
    assert_hours("75:00", 1.25);
}

#[test]
fn test_stopwatch_hour_form() {
    assert_hours("1:05:00", 1.0 + 5.0 / 60.0);
    assert_hours("2:00:00", 2.0);
    assert_hours("0:10:30", 10.0 / 60.0 + 30.0 / 3600.0);
}

#[test]
fn test_korean_unit_markers() {
    assert_hours("30분", 0.5);
    assert_hours("1시간 5분", 1.0 + 5.0 / 60.0);
    assert_hours("2시간", 2.0);
    assert_hours("45초", 45.0 / 3600.0);
    assert_hours("1시간 30분 15초", 1.0 + 30.0 / 60.0 + 15.0 / 3600.0);
}

#[test]
fn test_english_unit_markers() {
    assert_hours("45 min", 0.75);
    assert_hours("1h 30m", 1.5);
    assert_hours("2 hours", 2.0);
    assert_hours("90 seconds", 90.0 / 3600.0);
}

#[test]
fn test_bare_number_is_minutes() {
    assert_hours("45", 0.75);
    assert_hours("60", 1.0);
    assert_hours("7.5", 7.5 / 60.0);
}

#[test]
fn test_unparseable_input_is_zero_never_a_failure() {
    for text in ["", "   ", "yesterday", "a:b", "::", "시간", "-10"] {
        assert_hours(text, 0.0);
    }
}

#[test]
fn test_parse_keeps_the_unparseable_distinction() {
    assert!(parse("45:00").is_some());
    assert!(parse("yesterday").is_none());
    assert!(parse("").is_none());
}
