// ABOUTME: Walk-routing service client
// ABOUTME: One attempt per request, timeout-bound, with 401 mapped to a distinct auth error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! The routing service adapter.
//!
//! Sends origin/destination (plus the companion names, which the
//! service uses for its own per-animal calorie figures) and decodes
//! the returned polyline. Requests are never retried automatically:
//! at most one attempt per user-initiated request, bounded by the
//! configured timeout. A failed or timed-out request leaves the live
//! session untouched — the caller simply never applies a summary.
//!
//! A 401-class response means the user's session with the service
//! expired; it surfaces as [`RouteError::AuthenticationFailed`] so
//! the caller can prompt re-login instead of a generic retry.

use packwalk_core::models::Coordinate;
use packwalk_core::{AppError, ErrorCode};
use packwalk_engine::polyline;
use packwalk_engine::session::RouteOverride;
use packwalk_engine::PolylineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::RoutingConfig;

const METERS_PER_KM: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Errors from a route request
#[derive(Debug, Error)]
pub enum RouteError {
    /// The service rejected our credentials; the user must sign in
    /// again
    #[error("routing service rejected credentials; sign-in required")]
    AuthenticationFailed,
    /// The request exceeded the configured timeout
    #[error("route request timed out")]
    Timeout,
    /// The service could not be reached
    #[error("routing service unreachable: {0}")]
    Network(String),
    /// The service answered with a non-success status
    #[error("routing service returned HTTP {status}")]
    Http {
        /// The response status code
        status: u16,
    },
    /// The response body was not the expected shape
    #[error("malformed route response: {0}")]
    InvalidResponse(String),
    /// The returned polyline could not be decoded
    #[error("malformed route polyline: {0}")]
    Decode(#[from] PolylineError),
}

impl RouteError {
    /// Whether this failure should prompt re-authentication rather
    /// than a generic retry/alert.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }
}

impl From<RouteError> for AppError {
    fn from(error: RouteError) -> Self {
        let code = if error.is_authentication() {
            ErrorCode::ExternalAuthFailed
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, error.to_string())
    }
}

/// Request body for the walk-route endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WalkRouteRequest<'a> {
    origin: Coordinate,
    destination: Coordinate,
    companion_names: &'a [String],
}

/// Wire shape of the walk-route response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WalkRouteResponse {
    distance_meters: f64,
    duration_seconds: f64,
    encoded_polyline: String,
    #[serde(default)]
    human_walk_calories_kcal: Option<u32>,
    #[serde(default)]
    per_animal: Vec<AnimalFigures>,
}

/// Per-animal figures in the wire response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalFigures {
    /// Companion name as sent in the request
    pub name: String,
    /// Server-computed energy figure for this companion
    #[serde(default)]
    pub walk_calories_kcal: Option<u32>,
}

/// A decoded route with the service's authoritative figures
#[derive(Debug, Clone)]
pub struct RouteSummary {
    /// Route length in kilometers
    pub distance_km: f64,
    /// Estimated duration in whole seconds
    pub duration_seconds: u64,
    /// Decoded route path
    pub path: Vec<Coordinate>,
    /// Server-computed human energy figure, if provided
    pub human_kcal: Option<u32>,
    /// Server-computed per-animal energy figures
    pub per_animal: Vec<AnimalFigures>,
}

impl RouteSummary {
    /// Estimated duration in fractional hours
    #[must_use]
    pub fn duration_hours(&self) -> f64 {
        self.duration_seconds as f64 / SECONDS_PER_HOUR
    }

    /// Summed per-animal figures; `None` when the service sent none
    #[must_use]
    pub fn companion_kcal_total(&self) -> Option<u32> {
        let figures: Vec<u32> = self
            .per_animal
            .iter()
            .filter_map(|animal| animal.walk_calories_kcal)
            .collect();
        if figures.is_empty() {
            None
        } else {
            Some(figures.iter().sum())
        }
    }

    /// Convert into the override applied onto a live session
    #[must_use]
    pub fn into_override(self) -> RouteOverride {
        let human_kcal = self.human_kcal;
        let companion_kcal_total = self.companion_kcal_total();
        RouteOverride {
            distance_km: Some(self.distance_km),
            duration_seconds: Some(self.duration_seconds),
            human_kcal,
            companion_kcal_total,
            path: self.path,
        }
    }
}

impl TryFrom<WalkRouteResponse> for RouteSummary {
    type Error = RouteError;

    fn try_from(wire: WalkRouteResponse) -> Result<Self, RouteError> {
        if !wire.distance_meters.is_finite() || wire.distance_meters < 0.0 {
            return Err(RouteError::InvalidResponse(format!(
                "distanceMeters {} out of range",
                wire.distance_meters
            )));
        }
        if !wire.duration_seconds.is_finite() || wire.duration_seconds < 0.0 {
            return Err(RouteError::InvalidResponse(format!(
                "durationSeconds {} out of range",
                wire.duration_seconds
            )));
        }
        let path = polyline::decode(&wire.encoded_polyline)?;
        Ok(Self {
            distance_km: wire.distance_meters / METERS_PER_KM,
            duration_seconds: wire.duration_seconds.round() as u64,
            path,
            human_kcal: wire.human_walk_calories_kcal,
            per_animal: wire.per_animal,
        })
    }
}

/// HTTP client for the walk-routing service
pub struct RoutingClient {
    config: RoutingConfig,
    http_client: reqwest::Client,
    bearer_token: Option<String>,
}

impl RoutingClient {
    /// Create a client over the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns `AppError::config` when the HTTP client cannot be
    /// built.
    pub fn new(config: RoutingConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            config,
            http_client,
            bearer_token: None,
        })
    }

    /// Attach a bearer token supplied by the authentication
    /// collaborator. Token acquisition and storage are not this
    /// crate's concern.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Request a walk route from origin to destination.
    ///
    /// One attempt, no automatic retry.
    ///
    /// # Errors
    ///
    /// [`RouteError::AuthenticationFailed`] on a 401-class response;
    /// [`RouteError::Timeout`] / [`RouteError::Network`] /
    /// [`RouteError::Http`] for transport failures;
    /// [`RouteError::InvalidResponse`] / [`RouteError::Decode`] for
    /// malformed bodies.
    #[instrument(skip(self, companion_names), fields(api_call = "route_walk"))]
    pub async fn request_walk_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        companion_names: &[String],
    ) -> Result<RouteSummary, RouteError> {
        let url = format!(
            "{}/api/route/walk",
            self.config.base_url.trim_end_matches('/')
        );
        let mut request = self.http_client.post(&url).json(&WalkRouteRequest {
            origin,
            destination,
            companion_names,
        });
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|error| {
            if error.is_timeout() {
                RouteError::Timeout
            } else {
                RouteError::Network(error.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RouteError::AuthenticationFailed);
        }
        if !status.is_success() {
            return Err(RouteError::Http {
                status: status.as_u16(),
            });
        }

        let wire: WalkRouteResponse = response
            .json()
            .await
            .map_err(|error| RouteError::InvalidResponse(error.to_string()))?;

        let summary = RouteSummary::try_from(wire)?;
        debug!(
            distance_km = summary.distance_km,
            duration_seconds = summary.duration_seconds,
            points = summary.path.len(),
            "decoded walk route"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use packwalk_engine::polyline;

    fn wire(encoded: &str) -> WalkRouteResponse {
        serde_json::from_str(&format!(
            r#"{{
                "distanceMeters": 1500.0,
                "durationSeconds": 1080,
                "encodedPolyline": "{encoded}",
                "humanWalkCaloriesKcal": 84,
                "perAnimal": [
                    {{"name": "Mari", "walkCaloriesKcal": 31}},
                    {{"name": "Bodri"}}
                ]
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_response_conversion_and_totals() {
        let encoded = polyline::encode(&[
            Coordinate::new(37.5665, 126.978),
            Coordinate::new(37.57, 126.98),
        ]);
        let summary = RouteSummary::try_from(wire(&encoded)).unwrap();
        assert!((summary.distance_km - 1.5).abs() < 1e-9);
        assert_eq!(summary.duration_seconds, 1080);
        assert!((summary.duration_hours() - 0.3).abs() < 1e-9);
        assert_eq!(summary.path.len(), 2);
        assert_eq!(summary.human_kcal, Some(84));
        // One companion had no figure; the total sums what exists.
        assert_eq!(summary.companion_kcal_total(), Some(31));
    }

    #[test]
    fn test_malformed_polyline_is_decode_error() {
        let result = RouteSummary::try_from(wire("_p~iF"));
        assert!(matches!(result, Err(RouteError::Decode(_))));
    }

    #[test]
    fn test_auth_error_is_distinguishable() {
        assert!(RouteError::AuthenticationFailed.is_authentication());
        assert!(!RouteError::Timeout.is_authentication());
        let app: AppError = RouteError::AuthenticationFailed.into();
        assert_eq!(app.code, ErrorCode::ExternalAuthFailed);
    }
}
