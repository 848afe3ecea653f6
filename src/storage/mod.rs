// ABOUTME: Durable storage abstraction for the engine's JSON keys
// ABOUTME: Pluggable backend trait with in-memory and file implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Durable key-value storage.
//!
//! The engine's logical schema is two JSON documents: the day-record
//! list and the animal-profile list, each under its own key. The
//! storage technology is a collaborator, so this module only defines
//! the [`StorageProvider`] trait plus two backends: [`memory`] for
//! tests and embedding hosts that persist elsewhere, and [`file`] for
//! a plain on-disk layout.

/// File-backed storage, one JSON file per key
pub mod file;

/// In-memory storage for tests and custom hosts
pub mod memory;

use async_trait::async_trait;
use packwalk_core::AppResult;
use serde::{de::DeserializeOwned, Serialize};

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys used by the engine
pub mod keys {
    /// JSON-serialized list of day records
    pub const DAY_RECORDS: &str = "day_records";
    /// JSON-serialized list of animal profiles
    pub const ANIMAL_PROFILES: &str = "animal_profiles";
}

/// Pluggable key-value storage backend.
///
/// Values are opaque strings; the typed layer on top
/// ([`get_json`]/[`put_json`]) owns (de)serialization so every backend
/// stores identical bytes.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read the raw value under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::storage` when the backend cannot be read.
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>>;

    /// Write the raw value under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::storage` when the backend cannot be written.
    async fn put_raw(&self, key: &str, value: String) -> AppResult<()>;

    /// Remove `key`; removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::storage` when the backend cannot be written.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Read and deserialize the JSON value under `key`.
///
/// # Errors
///
/// Propagates backend errors; malformed JSON is a serialization error.
pub async fn get_json<T: DeserializeOwned>(
    storage: &dyn StorageProvider,
    key: &str,
) -> AppResult<Option<T>> {
    match storage.get_raw(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize and write `value` under `key`.
///
/// # Errors
///
/// Propagates backend and serialization errors.
pub async fn put_json<T: Serialize + Sync>(
    storage: &dyn StorageProvider,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let raw = serde_json::to_string(value)?;
    storage.put_raw(key, raw).await
}
