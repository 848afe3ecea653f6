// ABOUTME: Domain models for the Packwalk activity engine
// ABOUTME: Coordinates, activity kinds, animal profiles, and persisted day records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Domain models shared across the engine.
//!
//! Everything here is plain serde-serializable data. Behavior (distance
//! math, energy coefficients, state transitions) lives in
//! `packwalk-engine`; persistence lives in the root crate.

use serde::{Deserialize, Serialize};

/// Animal profile and breed catalog types
pub mod animal;

/// Persisted running records and day entries
pub mod record;

pub use animal::{ActivityLevel, AnimalProfile, Breed};
pub use record::{DayEntry, DayRecord, RunningRecord};

/// A geographic position in WGS84 degrees. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude/longitude degrees
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite numbers.
    ///
    /// Device position sources occasionally emit NaN or infinite
    /// samples; those must never reach the distance accumulator.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// The kind of activity being tracked. Selected once at session start;
/// fixes the energy-model constants for the session's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Running
    Run,
    /// Walking
    Walk,
}

impl ActivityKind {
    /// Stable lowercase name, matching the serialized form
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Walk => "walk",
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_coordinate_finite_check() {
        assert!(Coordinate::new(37.5665, 126.9780).is_finite());
        assert!(!Coordinate::new(f64::NAN, 126.9780).is_finite());
        assert!(!Coordinate::new(37.5665, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_activity_kind_serialization() {
        assert_eq!(serde_json::to_string(&ActivityKind::Run).unwrap(), "\"run\"");
        assert_eq!(
            serde_json::from_str::<ActivityKind>("\"walk\"").unwrap(),
            ActivityKind::Walk
        );
    }
}
