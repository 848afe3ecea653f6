// ABOUTME: Foundation crate for the Packwalk activity engine
// ABOUTME: Domain models, unified error types, duration parsing, and record formatters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! # Packwalk Core
//!
//! Foundation types shared by every Packwalk crate: the domain models
//! (coordinates, animal profiles, day records), the unified error type,
//! lenient duration/number parsing for historical record text, and the
//! formatters that produce that text in the first place.

/// Free-form duration text parsing
pub mod duration;

/// Unified error handling with standard error codes
pub mod errors;

/// Record text formatters and lenient numeric parsing
pub mod format;

/// Domain models for sessions, profiles, and persisted records
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
