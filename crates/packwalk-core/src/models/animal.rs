// ABOUTME: Companion animal profile model and the closed breed catalog
// ABOUTME: Profiles carry identity, weight, age, breed, and activity level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-reported day-to-day activity level of a companion animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Mostly sedentary
    Low,
    /// Typical household activity
    #[default]
    Medium,
    /// Working or highly active animal
    High,
}

/// Closed breed catalog.
///
/// Unrecognized breed strings deserialize to [`Breed::Mixed`], which
/// carries the neutral energy multiplier. The energy coefficients
/// themselves live in `packwalk-engine::energy` next to the rest of
/// the model constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Breed {
    /// Golden Retriever
    GoldenRetriever,
    /// Labrador Retriever
    Labrador,
    /// Siberian Husky
    Husky,
    /// Border Collie
    BorderCollie,
    /// Beagle
    Beagle,
    /// Shiba Inu
    Shiba,
    /// Jindo
    Jindo,
    /// Maltese
    Maltese,
    /// Bichon Frise
    BichonFrise,
    /// Chihuahua
    Chihuahua,
    /// Yorkshire Terrier
    YorkshireTerrier,
    /// Poodle
    Poodle,
    /// Bulldog
    Bulldog,
    /// Mixed or unknown breed
    #[default]
    #[serde(other)]
    Mixed,
}

impl Breed {
    /// Every breed in the catalog, in display order
    pub const ALL: [Self; 14] = [
        Self::Mixed,
        Self::GoldenRetriever,
        Self::Labrador,
        Self::Husky,
        Self::BorderCollie,
        Self::Beagle,
        Self::Shiba,
        Self::Jindo,
        Self::Maltese,
        Self::BichonFrise,
        Self::Chihuahua,
        Self::YorkshireTerrier,
        Self::Poodle,
        Self::Bulldog,
    ];
}

/// A companion animal profile.
///
/// Owned by the profile list; referenced by id from the session's
/// companion selection. Deleting a profile removes its id from any
/// current selection, so a selection can never dangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalProfile {
    /// Stable identity, assigned at creation
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Age in whole years
    pub age_years: u32,
    /// Breed from the closed catalog
    #[serde(default)]
    pub breed: Breed,
    /// Day-to-day activity level
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl AnimalProfile {
    /// Create a profile with a fresh id
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        weight_kg: f64,
        age_years: u32,
        breed: Breed,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            weight_kg,
            age_years,
            breed,
            activity_level,
        }
    }
}
