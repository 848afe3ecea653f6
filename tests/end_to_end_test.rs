// ABOUTME: End-to-end scenario: track a run, finalize it, persist it, aggregate it
// ABOUTME: Exercises the controller, formatters, record store, and aggregation together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use packwalk::engine::session::SessionController;
use packwalk::storage::MemoryStorage;
use packwalk::store::{RecordScope, RecordStore};
use packwalk_core::models::{ActivityKind, Coordinate};
use std::sync::Arc;

#[tokio::test]
async fn test_run_session_to_monthly_statistics() {
    // Track: start a run at (37.0, 127.0), move one millidegree north
    // over ten minutes.
    let mut controller = SessionController::new();
    controller
        .start(ActivityKind::Run, Coordinate::new(37.0, 127.0))
        .unwrap();
    for _ in 0..600 {
        controller.tick().unwrap();
    }
    controller
        .on_position(Coordinate::new(37.001, 127.0))
        .unwrap();

    let session = controller.session().unwrap();
    assert!((session.distance_km() - 0.111).abs() < 0.002);
    // 700 kcal/h over 10 minutes.
    assert_eq!(session.human_kcal(), 117);

    // Stop and persist.
    controller.stop().unwrap();
    assert!(controller.is_worth_saving());
    let record = controller.finalize().unwrap();

    let store = RecordStore::new(Arc::new(MemoryStorage::new()));
    store.load().await.unwrap();
    store.append("2024-01-01", record).await.unwrap();

    // Aggregate the month.
    let totals = store
        .aggregate(RecordScope::Month {
            year: 2024,
            month: 1,
        })
        .await;
    assert_eq!(totals.entry_count, 1);
    assert!((totals.total_distance_km - 0.111).abs() < 0.005);
    assert!((totals.total_human_kcal - 117.0).abs() < 1e-9);
    assert!((totals.total_hours - 10.0 / 60.0).abs() < 1e-9);

    // A second session the same day accumulates instead of replacing.
    let mut controller = SessionController::new();
    controller
        .start(ActivityKind::Walk, Coordinate::new(37.001, 127.0))
        .unwrap();
    for _ in 0..1800 {
        controller.tick().unwrap();
    }
    controller.stop().unwrap();
    store
        .append("2024-01-01", controller.finalize().unwrap())
        .await
        .unwrap();

    let totals = store
        .aggregate(RecordScope::Month {
            year: 2024,
            month: 1,
        })
        .await;
    assert_eq!(totals.entry_count, 2);
    // 140 kcal from the half-hour walk on top of the run.
    assert!((totals.total_human_kcal - 257.0).abs() < 1e-9);

    // And the other month is untouched.
    let february = store
        .aggregate(RecordScope::Month {
            year: 2024,
            month: 2,
        })
        .await;
    assert_eq!(february.entry_count, 0);
}
