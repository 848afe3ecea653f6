// ABOUTME: In-memory storage backend
// ABOUTME: HashMap behind an async RwLock; used by tests and custom hosts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

use async_trait::async_trait;
use packwalk_core::AppResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::StorageProvider;

/// In-memory key-value storage. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, for tests that need pre-existing stored state
    pub async fn seed(&self, key: &str, value: impl Into<String>) {
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.into());
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_raw(&self, key: &str, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
