// ABOUTME: Energy expenditure model for the human and companion animals
// ABOUTME: Fixed per-activity human rates; allometric base with activity, breed, and speed factors for animals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Energy expenditure estimation.
//!
//! The human estimate is a flat per-hour rate fixed by the activity
//! kind. The companion-animal estimate scales an allometric base
//! metabolic rate (`70 · kg^0.75` kcal/day) by activity-level and
//! breed coefficients, then by an intensity factor derived from the
//! session's average speed. These are explainable heuristics for a
//! live display, not medical-grade estimates.
//!
//! Everything here is recomputed on every tick and position update so
//! the display stays live; the math is a handful of multiplications
//! over at most a few companions.

use packwalk_core::models::{ActivityKind, ActivityLevel, AnimalProfile, Breed};

/// Human expenditure while running, kcal per hour
const HUMAN_RUN_KCAL_PER_HOUR: f64 = 700.0;
/// Human expenditure while walking, kcal per hour
const HUMAN_WALK_KCAL_PER_HOUR: f64 = 280.0;

/// Allometric base metabolic rate coefficient, kcal/day per kg^0.75
const BMR_COEFFICIENT: f64 = 70.0;
/// Allometric scaling exponent
const BMR_EXPONENT: f64 = 0.75;

/// Average speed above this is treated as sensor noise and capped
const SPEED_CAP_KMH: f64 = 15.0;
/// Assumed speed when no elapsed time exists yet
const DEFAULT_SPEED_KMH: f64 = 5.0;
/// Speed contribution divisor in the intensity factor
const SPEED_INTENSITY_DIVISOR: f64 = 20.0;

const HOURS_PER_DAY: f64 = 24.0;

/// Human energy expenditure in kcal, rounded to the nearest integer.
#[must_use]
pub fn human_kcal(kind: ActivityKind, hours: f64) -> u32 {
    let rate = match kind {
        ActivityKind::Run => HUMAN_RUN_KCAL_PER_HOUR,
        ActivityKind::Walk => HUMAN_WALK_KCAL_PER_HOUR,
    };
    (rate * hours.max(0.0)).round() as u32
}

/// Activity-level multiplier applied to the base metabolic rate
#[must_use]
pub const fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Low => 1.2,
        ActivityLevel::Medium => 1.4,
        ActivityLevel::High => 1.8,
    }
}

/// Per-breed energy multiplier from the closed catalog.
///
/// High-energy working breeds land around 1.3–1.5, toy breeds around
/// 0.8–0.9, and mixed/unknown stays neutral at 1.0.
#[must_use]
pub const fn breed_multiplier(breed: Breed) -> f64 {
    match breed {
        Breed::Husky => 1.5,
        Breed::BorderCollie => 1.4,
        Breed::GoldenRetriever | Breed::Labrador => 1.3,
        Breed::Beagle | Breed::Jindo => 1.2,
        Breed::Shiba => 1.1,
        Breed::Mixed | Breed::Poodle | Breed::BichonFrise => 1.0,
        Breed::Maltese | Breed::Bulldog => 0.9,
        Breed::Chihuahua | Breed::YorkshireTerrier => 0.8,
    }
}

/// How hard the activity kind taxes the animal per unit time.
/// Walking is gentler than running.
#[must_use]
pub const fn activity_type_factor(kind: ActivityKind) -> f64 {
    match kind {
        ActivityKind::Run => 1.0,
        ActivityKind::Walk => 0.7,
    }
}

/// Average speed for the intensity factor: capped at
/// [`SPEED_CAP_KMH`], defaulting to [`DEFAULT_SPEED_KMH`] before any
/// time has elapsed.
fn average_speed_kmh(distance_km: f64, hours: f64) -> f64 {
    if hours > 0.0 {
        (distance_km / hours).min(SPEED_CAP_KMH)
    } else {
        DEFAULT_SPEED_KMH
    }
}

/// Companion-animal energy expenditure in kcal, rounded to the
/// nearest integer.
///
/// `(70 · kg^0.75 · activity · breed / 24) · (1 + speed/20) ·
/// type_factor · hours`
#[must_use]
pub fn animal_kcal(
    profile: &AnimalProfile,
    hours: f64,
    distance_km: f64,
    kind: ActivityKind,
) -> u32 {
    let base_daily = BMR_COEFFICIENT * profile.weight_kg.max(0.0).powf(BMR_EXPONENT);
    let daily = base_daily
        * activity_multiplier(profile.activity_level)
        * breed_multiplier(profile.breed);

    let speed = average_speed_kmh(distance_km, hours);
    let intensity = (1.0 + speed / SPEED_INTENSITY_DIVISOR) * activity_type_factor(kind);

    ((daily / HOURS_PER_DAY) * intensity * hours.max(0.0)).round() as u32
}

/// Summed expenditure across the selected companions.
///
/// An empty selection is 0 without touching the model.
#[must_use]
pub fn companion_kcal_total(
    companions: &[AnimalProfile],
    hours: f64,
    distance_km: f64,
    kind: ActivityKind,
) -> u32 {
    if companions.is_empty() {
        return 0;
    }
    companions
        .iter()
        .map(|profile| animal_kcal(profile, hours, distance_km, kind))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use packwalk_core::models::{ActivityLevel, AnimalProfile, Breed};

    fn profile(weight_kg: f64, level: ActivityLevel, breed: Breed) -> AnimalProfile {
        AnimalProfile::new("test", weight_kg, 3, breed, level)
    }

    #[test]
    fn test_human_run_exceeds_walk() {
        for hours in [0.1, 0.5, 1.0, 2.5] {
            assert!(human_kcal(ActivityKind::Run, hours) > human_kcal(ActivityKind::Walk, hours));
        }
    }

    #[test]
    fn test_human_kcal_rounds() {
        // 700 * (600 / 3600) ≈ 116.7 → 117
        assert_eq!(human_kcal(ActivityKind::Run, 600.0 / 3600.0), 117);
    }

    #[test]
    fn test_animal_kcal_monotonic_in_weight() {
        let light = profile(5.0, ActivityLevel::Medium, Breed::Mixed);
        let heavy = profile(30.0, ActivityLevel::Medium, Breed::Mixed);
        assert!(
            animal_kcal(&heavy, 1.0, 4.0, ActivityKind::Walk)
                >= animal_kcal(&light, 1.0, 4.0, ActivityKind::Walk)
        );
    }

    #[test]
    fn test_animal_kcal_monotonic_in_hours_at_fixed_speed() {
        let dog = profile(12.0, ActivityLevel::High, Breed::BorderCollie);
        // Hold speed at 5 km/h while hours grow.
        let one = animal_kcal(&dog, 1.0, 5.0, ActivityKind::Run);
        let two = animal_kcal(&dog, 2.0, 10.0, ActivityKind::Run);
        assert!(two >= one);
    }

    #[test]
    fn test_speed_is_capped() {
        let dog = profile(10.0, ActivityLevel::Medium, Breed::Mixed);
        // 100 km in one hour caps at 15 km/h, same as exactly 15 km.
        assert_eq!(
            animal_kcal(&dog, 1.0, 100.0, ActivityKind::Run),
            animal_kcal(&dog, 1.0, 15.0, ActivityKind::Run)
        );
    }

    #[test]
    fn test_empty_companion_selection_is_zero() {
        assert_eq!(companion_kcal_total(&[], 1.0, 5.0, ActivityKind::Run), 0);
    }

    #[test]
    fn test_companion_total_sums() {
        let a = profile(8.0, ActivityLevel::Low, Breed::Maltese);
        let b = profile(25.0, ActivityLevel::High, Breed::Husky);
        let total = companion_kcal_total(&[a.clone(), b.clone()], 0.5, 2.0, ActivityKind::Walk);
        let summed = animal_kcal(&a, 0.5, 2.0, ActivityKind::Walk)
            + animal_kcal(&b, 0.5, 2.0, ActivityKind::Walk);
        assert_eq!(total, summed);
    }
}
