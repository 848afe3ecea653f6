// ABOUTME: Async driver for the session state machine
// ABOUTME: Serializes the one-second tick and the position stream onto one lock; guards stale route responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! The async session tracker.
//!
//! Two independent event sources drive a live session: a periodic
//! one-second timer and an irregular position-update stream. The
//! tracker owns the [`SessionController`] behind a single async mutex
//! and applies each event's full update (elapsed + energies, or
//! position + distance + energies) inside one lock acquisition, so a
//! [`snapshot`](SessionTracker::snapshot) never observes a torn state.
//!
//! Route requests run off the interactive path: the lock is released
//! for the duration of the network call, and the session epoch taken
//! before the request is checked before applying the response — a
//! response landing after the session stopped or reset is discarded.

use packwalk_core::models::{ActivityKind, AnimalProfile, Coordinate, RunningRecord};
use packwalk_core::{format, AppError, AppResult};
use packwalk_engine::session::{SessionController, SessionError, SessionState};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::external::routing::{RouteSummary, RoutingClient};

/// One sample from the position source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// When the device produced the sample
    pub timestamp: DateTime<Utc>,
}

impl PositionSample {
    /// Create a sample stamped now
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: Utc::now(),
        }
    }

    /// The sample's coordinate
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A consistent read of the live session for display.
///
/// Taken under the tracker's lock, so the derived fields always agree
/// with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Lifecycle state at the time of the read
    pub state: SessionState,
    /// Activity kind, when a session exists
    pub activity_kind: Option<ActivityKind>,
    /// Elapsed whole seconds
    pub elapsed_seconds: u64,
    /// Elapsed time formatted `MM:SS` for display
    pub duration_text: String,
    /// Accumulated distance in kilometers
    pub distance_km: f64,
    /// Live human energy estimate
    pub human_kcal: u32,
    /// Live summed companion energy estimate
    pub companion_kcal_total: u32,
    /// Chosen destination, if any
    pub destination: Option<Coordinate>,
    /// The live-tracked path
    pub path: Vec<Coordinate>,
    /// The server route, rendered distinctly from the live path
    pub server_route: Option<Vec<Coordinate>>,
}

impl SessionSnapshot {
    fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            activity_kind: None,
            elapsed_seconds: 0,
            duration_text: format::format_duration(0),
            distance_km: 0.0,
            human_kcal: 0,
            companion_kcal_total: 0,
            destination: None,
            path: Vec::new(),
            server_route: None,
        }
    }
}

/// Async owner of the single live session.
pub struct SessionTracker {
    controller: Mutex<SessionController>,
    routing: Option<RoutingClient>,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTracker {
    /// Create a tracker with no routing client; route requests will
    /// fail until one is attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller: Mutex::new(SessionController::new()),
            routing: None,
        }
    }

    /// Attach the routing service client
    #[must_use]
    pub fn with_routing(mut self, client: RoutingClient) -> Self {
        self.routing = Some(client);
        self
    }

    /// Start a session. See [`SessionController::start`].
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] on an illegal transition.
    pub async fn start(
        &self,
        activity_kind: ActivityKind,
        origin: Coordinate,
    ) -> Result<(), SessionError> {
        self.controller.lock().await.start(activity_kind, origin)
    }

    /// Stop the session, freezing its derived values.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] on an illegal transition.
    pub async fn stop(&self) -> Result<(), SessionError> {
        self.controller.lock().await.stop()
    }

    /// Discard the session without persisting.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] on an illegal transition.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.controller.lock().await.reset()
    }

    /// Convert the completed session into a persistable record.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] unless the session is Completed.
    pub async fn finalize(&self) -> Result<RunningRecord, SessionError> {
        self.controller.lock().await.finalize()
    }

    /// Whether the session carries anything worth persisting
    pub async fn is_worth_saving(&self) -> bool {
        self.controller.lock().await.is_worth_saving()
    }

    /// Replace the sticky companion selection
    pub async fn set_companions(&self, companions: Vec<AnimalProfile>) {
        self.controller.lock().await.set_companions(companions);
    }

    /// Choose a destination for a route request.
    ///
    /// # Errors
    ///
    /// Propagates [`SessionError`] unless the session is Active.
    pub async fn set_destination(&self, destination: Coordinate) -> Result<(), SessionError> {
        self.controller.lock().await.set_destination(destination)
    }

    /// Current lifecycle state
    pub async fn state(&self) -> SessionState {
        self.controller.lock().await.state()
    }

    /// A consistent snapshot of the live session
    pub async fn snapshot(&self) -> SessionSnapshot {
        let controller = self.controller.lock().await;
        let Some(session) = controller.session() else {
            return SessionSnapshot::idle();
        };
        SessionSnapshot {
            state: controller.state(),
            activity_kind: Some(session.activity_kind()),
            elapsed_seconds: session.elapsed_seconds(),
            duration_text: format::format_duration(session.elapsed_seconds()),
            distance_km: session.distance_km(),
            human_kcal: session.human_kcal(),
            companion_kcal_total: session.companion_kcal_total(),
            destination: session.destination(),
            path: session.positions().to_vec(),
            server_route: session.server_route().map(<[Coordinate]>::to_vec),
        }
    }

    /// Drive the session from the two event sources until the
    /// position stream ends.
    ///
    /// Ticks and samples arriving while the session is not Active are
    /// ignored; the controller's loud transition contract stays
    /// reserved for actual API misuse.
    pub async fn run<S>(&self, mut positions: S)
    where
        S: Stream<Item = PositionSample> + Unpin,
    {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first interval tick fires immediately; swallow it so
        // second zero is not double counted.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mut controller = self.controller.lock().await;
                    if controller.state() == SessionState::Active {
                        if let Err(error) = controller.tick() {
                            warn!(%error, "session tick rejected");
                        }
                    }
                }
                sample = positions.next() => {
                    let Some(sample) = sample else { break };
                    let mut controller = self.controller.lock().await;
                    if controller.state() == SessionState::Active {
                        if let Err(error) = controller.on_position(sample.coordinate()) {
                            warn!(%error, "position update rejected");
                        }
                    } else {
                        debug!("ignoring position sample outside an active session");
                    }
                }
            }
        }
    }

    /// Request a server route from the current position to the chosen
    /// destination and apply it onto the live session.
    ///
    /// The network call runs without holding the session lock. If the
    /// session stops or resets while the request is in flight, the
    /// response is discarded and the summary is still returned for
    /// informational display.
    ///
    /// # Errors
    ///
    /// `AppError` with code `EXTERNAL_AUTH_FAILED` when the service
    /// wants re-authentication; `EXTERNAL_SERVICE_ERROR` for any
    /// other transport or decode failure; `INVALID_STATE` when there
    /// is no active session, position, destination, or routing
    /// client.
    pub async fn request_server_route(&self) -> AppResult<RouteSummary> {
        let Some(routing) = &self.routing else {
            return Err(AppError::invalid_state("no routing client configured"));
        };

        let (origin, destination, companion_names, epoch) = {
            let controller = self.controller.lock().await;
            if controller.state() != SessionState::Active {
                return Err(AppError::invalid_state(
                    "route requests need an active session",
                ));
            }
            let Some(session) = controller.session() else {
                return Err(AppError::invalid_state(
                    "route requests need an active session",
                ));
            };
            let origin = session
                .positions()
                .last()
                .copied()
                .ok_or_else(|| AppError::invalid_state("no position known yet"))?;
            let destination = session
                .destination()
                .ok_or_else(|| AppError::invalid_state("no destination chosen"))?;
            let companion_names: Vec<String> = controller
                .companions()
                .iter()
                .map(|profile| profile.name.clone())
                .collect();
            (origin, destination, companion_names, controller.epoch())
        };

        let summary = routing
            .request_walk_route(origin, destination, &companion_names)
            .await?;

        let mut controller = self.controller.lock().await;
        if controller.epoch() == epoch && controller.state() == SessionState::Active {
            controller
                .apply_route(summary.clone().into_override())
                .map_err(|error| AppError::invalid_state(error.to_string()))?;
        } else {
            debug!("discarding route response; session left Active while in flight");
        }
        Ok(summary)
    }
}
