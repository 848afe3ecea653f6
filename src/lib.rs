// ABOUTME: Main library entry point for the Packwalk activity engine
// ABOUTME: Wires configuration, storage, stores, routing, and the async session tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

#![deny(unsafe_code)]

//! # Packwalk
//!
//! The activity session and energy-expenditure engine behind a
//! dog-walking companion app: it turns a live stream of timestamped
//! positions into elapsed time, distance, energy estimates for the
//! human and any selected companion animals, and a schema-stable
//! persisted history.
//!
//! The surrounding app (screens, maps, photos, remote hospital/food
//! data, authentication, the device location API) is out of scope;
//! this crate consumes a position stream and a key-value storage
//! collaborator, and exposes everything else as plain async APIs.
//!
//! ## Architecture
//!
//! - `packwalk-core` — domain models, errors, duration parsing
//! - `packwalk-engine` — distance, polyline codec, energy model, and
//!   the session state machine (pure, no I/O)
//! - this crate — environment config, logging setup, storage
//!   backends, the record/profile stores, the routing client, and the
//!   async [`tracker`] that drives the state machine
//!
//! ## Example
//!
//! ```rust,no_run
//! use packwalk::storage::MemoryStorage;
//! use packwalk::store::RecordStore;
//! use packwalk::tracker::SessionTracker;
//! use packwalk_core::models::{ActivityKind, Coordinate};
//! use std::sync::Arc;
//!
//! # async fn example() -> packwalk_core::AppResult<()> {
//! let records = RecordStore::new(Arc::new(MemoryStorage::new()));
//! records.load().await?;
//!
//! let tracker = SessionTracker::new();
//! tracker
//!     .start(ActivityKind::Walk, Coordinate::new(37.5665, 126.9780))
//!     .await
//!     .map_err(|e| packwalk_core::AppError::invalid_state(e.to_string()))?;
//! # Ok(())
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// External service clients (walk routing)
pub mod external;

/// Structured logging setup
pub mod logging;

/// Durable key-value storage backends
pub mod storage;

/// Persisted record and profile stores
pub mod store;

/// Async session tracking
pub mod tracker;

pub use packwalk_core::{self as core, AppError, AppResult, ErrorCode};
pub use packwalk_engine as engine;
