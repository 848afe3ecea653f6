// ABOUTME: Tests for the async session tracker
// ABOUTME: Timer/position interleaving under one lock, consistent snapshots, run-loop behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use packwalk::engine::session::SessionState;
use packwalk::tracker::{PositionSample, SessionTracker};
use packwalk_core::models::{ActivityKind, Coordinate};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

fn origin() -> Coordinate {
    Coordinate::new(37.0, 127.0)
}

#[tokio::test]
async fn test_snapshot_of_idle_tracker() {
    let tracker = SessionTracker::new();
    let snapshot = tracker.snapshot().await;
    assert_eq!(snapshot.state, SessionState::Idle);
    assert_eq!(snapshot.duration_text, "00:00");
    assert!(snapshot.path.is_empty());
}

#[tokio::test]
async fn test_lifecycle_through_the_tracker() {
    let tracker = SessionTracker::new();
    tracker.start(ActivityKind::Run, origin()).await.unwrap();
    assert_eq!(tracker.state().await, SessionState::Active);

    tracker.stop().await.unwrap();
    assert_eq!(tracker.state().await, SessionState::Completed);
    tracker.reset().await.unwrap();
    assert_eq!(tracker.state().await, SessionState::Idle);

    // Transition contract stays loud through the async wrapper.
    assert!(tracker.stop().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_run_loop_ticks_once_per_second() {
    let tracker = Arc::new(SessionTracker::new());
    let (position_tx, position_rx) = mpsc::channel(16);

    let loop_tracker = Arc::clone(&tracker);
    let driver = tokio::spawn(async move { loop_tracker.run(ReceiverStream::new(position_rx)).await });

    tracker.start(ActivityKind::Run, origin()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let snapshot = tracker.snapshot().await;
    assert!(
        (9..=11).contains(&snapshot.elapsed_seconds),
        "elapsed {}",
        snapshot.elapsed_seconds
    );
    assert_eq!(snapshot.human_kcal, {
        let hours = f64::from(u32::try_from(snapshot.elapsed_seconds).unwrap()) / 3600.0;
        (700.0 * hours).round() as u32
    });

    drop(position_tx);
    driver.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_run_loop_applies_positions_and_keeps_snapshots_consistent() {
    let tracker = Arc::new(SessionTracker::new());
    let (position_tx, position_rx) = mpsc::channel(16);

    let loop_tracker = Arc::clone(&tracker);
    let driver = tokio::spawn(async move { loop_tracker.run(ReceiverStream::new(position_rx)).await });

    tracker.start(ActivityKind::Walk, origin()).await.unwrap();

    position_tx
        .send(PositionSample::new(37.001, 127.0))
        .await
        .unwrap();
    position_tx
        .send(PositionSample::new(37.002, 127.0))
        .await
        .unwrap();
    // Garbage from the sensor is dropped, not accumulated.
    position_tx
        .send(PositionSample::new(f64::NAN, 127.0))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let snapshot = tracker.snapshot().await;
    assert_eq!(snapshot.path.len(), 3);
    assert!((snapshot.distance_km - 0.222).abs() < 0.004);
    assert!(snapshot.distance_km.is_finite());

    // A snapshot is internally consistent: energies always reflect
    // the same elapsed/distance it reports.
    let hours = snapshot.elapsed_seconds as f64 / 3600.0;
    assert_eq!(snapshot.human_kcal, (280.0 * hours).round() as u32);

    drop(position_tx);
    driver.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_positions_outside_active_are_ignored() {
    let tracker = Arc::new(SessionTracker::new());
    let (position_tx, position_rx) = mpsc::channel(16);

    let loop_tracker = Arc::clone(&tracker);
    let driver = tokio::spawn(async move { loop_tracker.run(ReceiverStream::new(position_rx)).await });

    // No session yet: samples drain without effect.
    position_tx
        .send(PositionSample::new(37.001, 127.0))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(tracker.state().await, SessionState::Idle);

    tracker.start(ActivityKind::Run, origin()).await.unwrap();
    tracker.stop().await.unwrap();
    let frozen = tracker.snapshot().await;

    // Completed: late samples must not thaw the session.
    position_tx
        .send(PositionSample::new(37.01, 127.0))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(tracker.snapshot().await, frozen);

    drop(position_tx);
    driver.await.unwrap();
}

#[tokio::test]
async fn test_route_request_without_client_is_invalid_state() {
    let tracker = SessionTracker::new();
    tracker.start(ActivityKind::Walk, origin()).await.unwrap();
    tracker
        .set_destination(Coordinate::new(37.01, 127.0))
        .await
        .unwrap();

    let error = tracker.request_server_route().await.unwrap_err();
    assert_eq!(error.code, packwalk::ErrorCode::InvalidState);
}

#[tokio::test]
async fn test_finalize_through_tracker_produces_record() {
    let tracker = Arc::new(SessionTracker::new());
    let (position_tx, position_rx) = mpsc::channel(16);
    let loop_tracker = Arc::clone(&tracker);
    let driver = tokio::spawn(async move { loop_tracker.run(ReceiverStream::new(position_rx)).await });

    tracker.start(ActivityKind::Run, origin()).await.unwrap();
    position_tx
        .send(PositionSample::new(37.001, 127.0))
        .await
        .unwrap();
    // Give the run loop a moment to drain the sample.
    tokio::time::sleep(Duration::from_millis(50)).await;

    tracker.stop().await.unwrap();
    let record = tracker.finalize().await.unwrap();
    assert_eq!(record.distance, "0.11km");
    assert_eq!(tracker.state().await, SessionState::Idle);

    drop(position_tx);
    driver.await.unwrap();
}
