// ABOUTME: Animal profile store and the companion selection
// ABOUTME: Uuid identity keeps the selection valid across edits and deletions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! The animal profile store.
//!
//! Profiles persist across sessions until explicitly deleted; the
//! companion *selection* is runtime state that stays sticky across
//! sessions within a process. Selection is held by profile id, so
//! deleting a profile simply removes its id — the remaining selection
//! keeps referring to the same animals by identity, never through a
//! stale index.

use packwalk_core::models::AnimalProfile;
use packwalk_core::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::{self, keys, StorageProvider};

#[derive(Debug, Default)]
struct ProfileState {
    profiles: Vec<AnimalProfile>,
    selection: Vec<Uuid>,
    loaded: bool,
}

/// Persisted list of animal profiles plus the in-memory companion
/// selection.
///
/// The profile list is written back to storage after every mutation;
/// on a write failure the in-memory list stays authoritative and the
/// error is surfaced.
pub struct ProfileStore {
    storage: Arc<dyn StorageProvider>,
    state: Mutex<ProfileState>,
}

impl ProfileStore {
    /// Create a store over the given backend. Call
    /// [`load`](Self::load) before anything else.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            storage,
            state: Mutex::new(ProfileState::default()),
        }
    }

    /// Read the persisted profile list. Idempotent.
    ///
    /// # Errors
    ///
    /// Storage read failures and malformed JSON surface as errors.
    pub async fn load(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state.loaded {
            return Ok(());
        }
        state.profiles = storage::get_json(self.storage.as_ref(), keys::ANIMAL_PROFILES)
            .await?
            .unwrap_or_default();
        state.loaded = true;
        Ok(())
    }

    /// Snapshot of every profile, in insertion order
    pub async fn profiles(&self) -> Vec<AnimalProfile> {
        self.state.lock().await.profiles.clone()
    }

    /// Add a profile and persist the list.
    ///
    /// # Errors
    ///
    /// Fails when the store has not been loaded or the write fails.
    pub async fn create(&self, profile: AnimalProfile) -> AppResult<()> {
        let mut state = self.state.lock().await;
        Self::ensure_loaded(&state)?;
        state.profiles.push(profile);
        self.persist(&state.profiles).await
    }

    /// Replace the profile with the same id and persist the list.
    ///
    /// # Errors
    ///
    /// Fails when no profile carries the id, or the write fails.
    pub async fn update(&self, profile: AnimalProfile) -> AppResult<()> {
        let mut state = self.state.lock().await;
        Self::ensure_loaded(&state)?;
        let Some(existing) = state.profiles.iter_mut().find(|p| p.id == profile.id) else {
            return Err(AppError::not_found(format!("animal profile {}", profile.id)));
        };
        *existing = profile;
        self.persist(&state.profiles).await
    }

    /// Delete a profile, removing it from the companion selection as
    /// well, and persist the list.
    ///
    /// # Errors
    ///
    /// Fails when no profile carries the id, or the write fails.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        Self::ensure_loaded(&state)?;
        let before = state.profiles.len();
        state.profiles.retain(|profile| profile.id != id);
        if state.profiles.len() == before {
            return Err(AppError::not_found(format!("animal profile {id}")));
        }
        state.selection.retain(|selected| *selected != id);
        self.persist(&state.profiles).await
    }

    /// Add a profile to the companion selection. Selecting an already
    /// selected profile is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when no profile carries the id.
    pub async fn select(&self, id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        Self::ensure_loaded(&state)?;
        if !state.profiles.iter().any(|profile| profile.id == id) {
            return Err(AppError::not_found(format!("animal profile {id}")));
        }
        if !state.selection.contains(&id) {
            state.selection.push(id);
        }
        Ok(())
    }

    /// Remove a profile from the companion selection. Unselecting an
    /// unselected profile is a no-op.
    pub async fn deselect(&self, id: Uuid) {
        let mut state = self.state.lock().await;
        state.selection.retain(|selected| *selected != id);
    }

    /// Clear the companion selection
    pub async fn clear_selection(&self) {
        self.state.lock().await.selection.clear();
    }

    /// The selected profiles, resolved by identity in profile-list
    /// order.
    pub async fn selected_profiles(&self) -> Vec<AnimalProfile> {
        let state = self.state.lock().await;
        state
            .profiles
            .iter()
            .filter(|profile| state.selection.contains(&profile.id))
            .cloned()
            .collect()
    }

    /// Names of the selected profiles, for the routing request
    pub async fn selected_names(&self) -> Vec<String> {
        self.selected_profiles()
            .await
            .into_iter()
            .map(|profile| profile.name)
            .collect()
    }

    fn ensure_loaded(state: &ProfileState) -> AppResult<()> {
        if state.loaded {
            Ok(())
        } else {
            Err(AppError::invalid_state("profile store used before load()"))
        }
    }

    async fn persist(&self, profiles: &[AnimalProfile]) -> AppResult<()> {
        debug!(count = profiles.len(), "persisting animal profiles");
        storage::put_json(self.storage.as_ref(), keys::ANIMAL_PROFILES, &profiles)
            .await
            .map_err(|error| {
                warn!(%error, "failed to persist animal profiles; in-memory state kept");
                error
            })
    }
}
