// ABOUTME: External service clients
// ABOUTME: HTTP adapter for the remote walk-routing service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! Clients for external collaborators. Only the routing service is an
//! engine concern; every other remote surface (hospitals, food data,
//! auth) belongs to the app around this crate.

/// Walk-routing service client
pub mod routing;

pub use routing::{RouteError, RouteSummary, RoutingClient};
