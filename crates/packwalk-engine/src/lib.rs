// ABOUTME: Algorithm crate for the Packwalk activity engine
// ABOUTME: Geodesic distance, polyline codec, energy model, and session state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! # Packwalk Engine
//!
//! The algorithmic core: pure functions and a pure state machine, no
//! I/O. The root crate owns the async plumbing (timers, position
//! streams, routing requests, persistence) and drives this crate.
//!
//! - [`geo`] — great-circle distance accumulation
//! - [`polyline`] — encoded polyline wire format codec
//! - [`energy`] — human and companion-animal energy expenditure
//! - [`session`] — the Idle/Active/Completed session state machine

/// Human and companion-animal energy expenditure model
pub mod energy;

/// Great-circle distance on the WGS84 sphere
pub mod geo;

/// Encoded polyline codec
pub mod polyline;

/// Session state machine
pub mod session;

pub use polyline::PolylineError;
pub use session::{RouteOverride, Session, SessionController, SessionError, SessionState};
