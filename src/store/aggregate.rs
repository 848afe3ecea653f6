// ABOUTME: Aggregate statistics over the persisted record history
// ABOUTME: Lenient numeric/duration parsing; lifetime totals and per-entry monthly averages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Aggregate statistics.
//!
//! Flattens every entry across the selected scope and sums distance,
//! human kcal, companion kcal, and hours. Record fields are display
//! text written by several app generations (and occasionally edited
//! by hand), so every parse has a defined fallback of 0 — aggregation
//! never fails on malformed history.

use packwalk_core::models::DayRecord;
use packwalk_core::{duration, format};

/// Which slice of history to aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Every stored record
    AllTime,
    /// Records whose date falls in one calendar month
    Month {
        /// Calendar year
        year: i32,
        /// Calendar month, 1-12
        month: u32,
    },
}

impl RecordScope {
    /// Whether a `YYYY-MM-DD` date string falls inside this scope.
    /// Malformed dates match nothing but `AllTime`.
    #[must_use]
    pub fn matches(&self, date: &str) -> bool {
        match self {
            Self::AllTime => true,
            Self::Month { year, month } => date.starts_with(&format!("{year:04}-{month:02}-")),
        }
    }
}

/// Aggregated figures for a scope.
///
/// Averages are per entry over the in-scope count; every field is 0
/// (never NaN) when the scope is empty.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecordTotals {
    /// Number of entries in scope
    pub entry_count: usize,
    /// Summed distance in kilometers
    pub total_distance_km: f64,
    /// Summed human energy in kcal
    pub total_human_kcal: f64,
    /// Summed companion energy in kcal
    pub total_animal_kcal: f64,
    /// Summed duration in hours
    pub total_hours: f64,
    /// Mean distance per entry
    pub avg_distance_km: f64,
    /// Mean human energy per entry
    pub avg_human_kcal: f64,
    /// Mean companion energy per entry
    pub avg_animal_kcal: f64,
    /// Overall average speed, `total_distance_km / total_hours`
    pub avg_speed_kmh: f64,
}

/// Aggregate every in-scope entry. Never fails; unparseable text
/// contributes 0.
#[must_use]
pub fn aggregate(records: &[DayRecord], scope: RecordScope) -> RecordTotals {
    let mut totals = RecordTotals::default();

    let in_scope = records
        .iter()
        .filter(|day| scope.matches(&day.date))
        .flat_map(|day| &day.entries)
        .filter_map(|entry| entry.running_record.as_ref());

    for record in in_scope {
        totals.entry_count += 1;
        totals.total_distance_km += format::parse_lenient_f64(&record.distance).unwrap_or(0.0);
        totals.total_human_kcal +=
            format::parse_lenient_f64(&record.human_calories).unwrap_or(0.0);
        totals.total_animal_kcal +=
            format::parse_lenient_f64(&record.companion_calories).unwrap_or(0.0);
        totals.total_hours += duration::parse_hours(&record.duration);
    }

    if totals.entry_count > 0 {
        let count = totals.entry_count as f64;
        totals.avg_distance_km = totals.total_distance_km / count;
        totals.avg_human_kcal = totals.total_human_kcal / count;
        totals.avg_animal_kcal = totals.total_animal_kcal / count;
    }
    if totals.total_hours > 0.0 {
        totals.avg_speed_kmh = totals.total_distance_km / totals.total_hours;
    }

    totals
}
