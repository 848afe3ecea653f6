// ABOUTME: Persisted record models: running records, day entries, and day records
// ABOUTME: Carries both the canonical entries list and the two legacy shapes folded at load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

use serde::{Deserialize, Serialize};

use crate::format;

/// One completed session as stored: display text, not numbers.
///
/// Immutable once created. The aggregator re-reads the numbers with
/// lenient parsing, so hand-edited or legacy text degrades to 0
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningRecord {
    /// Elapsed time as `MM:SS` (total minutes, not wrapped at the hour)
    pub duration: String,
    /// Distance as `X.XXkm`
    pub distance: String,
    /// Human energy expenditure, integer kcal text
    #[serde(alias = "calories")]
    pub human_calories: String,
    /// Summed companion energy expenditure, integer kcal text
    #[serde(alias = "dogCalories")]
    pub companion_calories: String,
}

impl RunningRecord {
    /// Build a record from finalized session metrics
    #[must_use]
    pub fn from_metrics(
        elapsed_seconds: u64,
        distance_km: f64,
        human_kcal: u32,
        companion_kcal: u32,
    ) -> Self {
        Self {
            duration: format::format_duration(elapsed_seconds),
            distance: format::format_distance_km(distance_km),
            human_calories: format::format_kcal(human_kcal),
            companion_calories: format::format_kcal(companion_kcal),
        }
    }
}

/// Wrapper for one record under a calendar date, enabling multiple
/// records per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// The completed session record; absent in damaged storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_record: Option<RunningRecord>,
}

impl DayEntry {
    /// Wrap a running record
    #[must_use]
    pub const fn new(record: RunningRecord) -> Self {
        Self {
            running_record: Some(record),
        }
    }
}

/// All records stored under one calendar date.
///
/// At most one `DayRecord` exists per date string; entries accumulate
/// across multiple sessions on the same date and are never
/// overwritten. The `running_record` / `running_logs` fields are the
/// two legacy persistence shapes; the store folds them into `entries`
/// exactly once at load and clears them.
///
/// Photos, memo, and mood belong to other screens and ride along
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Calendar date, `YYYY-MM-DD`; unique key within the store
    pub date: String,
    /// Canonical, append-only list of completed records
    #[serde(default)]
    pub entries: Vec<DayEntry>,
    /// Photo URIs owned by the diary screen
    #[serde(default)]
    pub photos: Vec<String>,
    /// Free-text memo owned by the diary screen
    #[serde(default)]
    pub memo: String,
    /// Mood marker owned by the diary screen
    #[serde(default)]
    pub mood: String,
    /// Legacy single-record shape, folded into `entries` at load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_record: Option<RunningRecord>,
    /// Legacy list shape, folded into `entries` at load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_logs: Option<Vec<RunningRecord>>,
}

impl DayRecord {
    /// Create an empty record for a date
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            entries: Vec::new(),
            photos: Vec::new(),
            memo: String::new(),
            mood: String::new(),
            running_record: None,
            running_logs: None,
        }
    }
}
