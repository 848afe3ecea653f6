// ABOUTME: File-backed storage backend, one JSON file per key
// ABOUTME: Writes go to a temp file first and are renamed into place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

use async_trait::async_trait;
use packwalk_core::{AppError, AppResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::StorageProvider;

/// File-backed key-value storage.
///
/// Each key maps to `<root>/<key>.json`. Writes land in a sibling
/// `.tmp` file first and are renamed over the target, so a crash
/// mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a store rooted at `root`. The directory is created on
    /// first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn storage_error(path: &Path, action: &str, error: &std::io::Error) -> AppError {
        AppError::storage(format!("failed to {action} {}: {error}", path.display()))
    }
}

#[async_trait]
impl StorageProvider for FileStorage {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Self::storage_error(&path, "read", &error)),
        }
    }

    async fn put_raw(&self, key: &str, value: String) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Self::storage_error(&self.root, "create", &e))?;

        let path = self.path_for(key);
        let staging = self.root.join(format!("{key}.json.tmp"));
        tokio::fs::write(&staging, value)
            .await
            .map_err(|e| Self::storage_error(&staging, "write", &e))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| Self::storage_error(&path, "replace", &e))?;

        debug!(key, path = %path.display(), "persisted storage key");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Self::storage_error(&path, "remove", &error)),
        }
    }
}
