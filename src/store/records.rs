// ABOUTME: Append-only persisted history of day records
// ABOUTME: Folds the two legacy persistence schemas into the canonical entries list exactly once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! The day-record store.
//!
//! Storage holds one JSON list of [`DayRecord`]s. Two legacy schemas
//! exist in the wild: a single `runningRecord` object and a
//! `runningLogs` list. [`RecordStore::load`] classifies each record's
//! shape once, folds every legacy record into the canonical `entries`
//! list in original order (existing entries first, then the legacy
//! list, then the legacy single), clears the legacy fields, and
//! persists the migrated form back. Nothing else in the system ever
//! branches on the legacy shapes.
//!
//! The store is a single-writer resource: every operation takes the
//! state lock, so a concurrent `load` cannot run the migration twice
//! and double-append legacy entries.

use packwalk_core::models::{DayEntry, DayRecord, RunningRecord};
use packwalk_core::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::storage::{self, keys, StorageProvider};

use super::aggregate::{self, RecordScope, RecordTotals};

/// Persistence shape of one loaded day record, classified exactly
/// once at load time.
#[derive(Debug)]
enum LegacyShape {
    /// Only the canonical `entries` list
    Canonical,
    /// A single legacy `runningRecord`
    Single(Box<RunningRecord>),
    /// A legacy `runningLogs` list
    List(Vec<RunningRecord>),
    /// Both legacy fields at once
    Both {
        logs: Vec<RunningRecord>,
        single: Box<RunningRecord>,
    },
}

/// Take the legacy fields out of a record and name its shape.
fn classify(day: &mut DayRecord) -> LegacyShape {
    match (day.running_logs.take(), day.running_record.take()) {
        (None, None) => LegacyShape::Canonical,
        (None, Some(single)) => LegacyShape::Single(Box::new(single)),
        (Some(logs), None) => LegacyShape::List(logs),
        (Some(logs), Some(single)) => LegacyShape::Both {
            logs,
            single: Box::new(single),
        },
    }
}

/// Fold any legacy records into `entries`, in their original order.
/// Returns how many records were folded.
fn fold_legacy(day: &mut DayRecord) -> usize {
    let folded: Vec<RunningRecord> = match classify(day) {
        LegacyShape::Canonical => return 0,
        LegacyShape::Single(single) => vec![*single],
        LegacyShape::List(logs) => logs,
        LegacyShape::Both { mut logs, single } => {
            logs.push(*single);
            logs
        }
    };
    let count = folded.len();
    day.entries.extend(folded.into_iter().map(DayEntry::new));
    count
}

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<DayRecord>,
    /// Set after the first successful `load`; the migration never
    /// runs again for the lifetime of this store.
    loaded: bool,
}

/// Append-only persisted history of daily records.
///
/// Loaded once at process start; kept in memory; written back to
/// storage after every mutation. When a write fails the in-memory
/// state remains the source of truth and the error is surfaced, so
/// nothing accepted via [`append`](Self::append) is lost from the
/// running session.
pub struct RecordStore {
    storage: Arc<dyn StorageProvider>,
    state: Mutex<StoreState>,
}

impl RecordStore {
    /// Create a store over the given backend. Call
    /// [`load`](Self::load) before anything else.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Read all persisted day records, migrating legacy shapes.
    ///
    /// Idempotent: a second call (or a concurrent one; the state lock
    /// serializes them) is a no-op, so legacy entries can never be
    /// folded twice.
    ///
    /// # Errors
    ///
    /// Storage read failures and malformed JSON surface as errors.
    /// A failure to persist the migrated form is surfaced too, but
    /// the migrated in-memory state is kept.
    pub async fn load(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state.loaded {
            debug!("record store already loaded; skipping migration");
            return Ok(());
        }

        let mut records: Vec<DayRecord> =
            storage::get_json(self.storage.as_ref(), keys::DAY_RECORDS)
                .await?
                .unwrap_or_default();

        let folded: usize = records.iter_mut().map(fold_legacy).sum();
        state.records = records;
        state.loaded = true;

        if folded > 0 {
            info!(folded, "folded legacy running records into entries");
            self.persist(&state.records).await?;
        }
        Ok(())
    }

    /// Append a completed record under `date` (`YYYY-MM-DD`),
    /// creating the day record if needed. Existing entries for the
    /// date are never overwritten or removed.
    ///
    /// # Errors
    ///
    /// Fails when the store has not been loaded, or when the write
    /// behind it fails (the in-memory append is kept either way).
    pub async fn append(&self, date: &str, record: RunningRecord) -> AppResult<()> {
        let mut state = self.state.lock().await;
        Self::ensure_loaded(&state)?;

        if let Some(day) = state.records.iter_mut().find(|day| day.date == date) {
            day.entries.push(DayEntry::new(record));
        } else {
            let mut day = DayRecord::new(date);
            day.entries.push(DayEntry::new(record));
            state.records.push(day);
        }
        self.persist(&state.records).await
    }

    /// Remove the entire day record for `date`. Removing an absent
    /// date is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when the store has not been loaded or the write fails.
    pub async fn delete(&self, date: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        Self::ensure_loaded(&state)?;

        let before = state.records.len();
        state.records.retain(|day| day.date != date);
        if state.records.len() == before {
            debug!(date, "no day record to delete");
            return Ok(());
        }
        self.persist(&state.records).await
    }

    /// Snapshot of every day record, in stored order
    pub async fn day_records(&self) -> Vec<DayRecord> {
        self.state.lock().await.records.clone()
    }

    /// Aggregate statistics over the selected scope.
    ///
    /// Never fails: malformed distance/kcal/duration text contributes
    /// 0, not an error.
    pub async fn aggregate(&self, scope: RecordScope) -> RecordTotals {
        let state = self.state.lock().await;
        aggregate::aggregate(&state.records, scope)
    }

    fn ensure_loaded(state: &StoreState) -> AppResult<()> {
        if state.loaded {
            Ok(())
        } else {
            Err(AppError::invalid_state(
                "record store used before load()",
            ))
        }
    }

    async fn persist(&self, records: &[DayRecord]) -> AppResult<()> {
        storage::put_json(self.storage.as_ref(), keys::DAY_RECORDS, &records)
            .await
            .map_err(|error| {
                warn!(%error, "failed to persist day records; in-memory state kept");
                error
            })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn record(n: u32) -> RunningRecord {
        RunningRecord::from_metrics(600, 1.0, n, 0)
    }

    #[test]
    fn test_classify_shapes() {
        let mut day = DayRecord::new("2024-01-01");
        assert!(matches!(classify(&mut day), LegacyShape::Canonical));

        day.running_record = Some(record(1));
        assert!(matches!(classify(&mut day), LegacyShape::Single(_)));
        assert!(day.running_record.is_none());

        day.running_logs = Some(vec![record(1), record(2)]);
        assert!(matches!(classify(&mut day), LegacyShape::List(_)));

        day.running_logs = Some(vec![record(1)]);
        day.running_record = Some(record(2));
        assert!(matches!(classify(&mut day), LegacyShape::Both { .. }));
    }

    #[test]
    fn test_fold_order_entries_then_logs_then_single() {
        let mut day = DayRecord::new("2024-01-01");
        day.entries.push(DayEntry::new(record(1)));
        day.running_logs = Some(vec![record(2), record(3)]);
        day.running_record = Some(record(4));

        assert_eq!(fold_legacy(&mut day), 3);
        let calories: Vec<&str> = day
            .entries
            .iter()
            .filter_map(|entry| entry.running_record.as_ref())
            .map(|r| r.human_calories.as_str())
            .collect();
        assert_eq!(calories, ["1", "2", "3", "4"]);
        assert!(day.running_logs.is_none());
        assert!(day.running_record.is_none());
    }
}
