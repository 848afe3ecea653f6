// ABOUTME: Persisted stores for day records and animal profiles
// ABOUTME: Append-only record history with legacy-schema migration, plus profile management
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Persisted stores.
//!
//! [`RecordStore`] owns the append-only day-record history and its
//! one-time legacy-schema migration; [`ProfileStore`] owns the animal
//! profile list and the companion selection. Both keep state in
//! memory behind a single-writer lock and write the full document
//! back to storage after every mutation.

/// Scope-filtered aggregate statistics over the record history
pub mod aggregate;

/// Animal profile store and companion selection
pub mod profiles;

/// Day-record store with legacy migration
pub mod records;

pub use aggregate::{RecordScope, RecordTotals};
pub use profiles::ProfileStore;
pub use records::RecordStore;
