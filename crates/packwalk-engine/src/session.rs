// ABOUTME: Session state machine: Idle -> Active -> Completed -> Idle
// ABOUTME: Owns the live session value; accumulates distance and recomputes energy on every update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Packwalk contributors

//! The tracking session state machine.
//!
//! [`SessionController`] is the sole owner and mutator of the live
//! [`Session`] value. It is a pure, synchronous state machine: the
//! async driver in the root crate serializes timer ticks and position
//! updates onto it, so every derived field (distance, energies) is
//! consistent with the inputs at all times.
//!
//! Illegal transitions are contract violations and fail loudly with
//! [`SessionError::InvalidTransition`]; silently ignoring them has
//! historically masked UI bugs.

use chrono::{DateTime, Utc};
use packwalk_core::models::{ActivityKind, AnimalProfile, Coordinate, RunningRecord};
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::{energy, geo};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// The controller's position in the session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session in progress
    Idle,
    /// A session is being tracked
    Active,
    /// A session has stopped and awaits finalize or reset
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Completed => "completed",
        })
    }
}

/// Session contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// An operation was attempted from a state that does not permit it
    #[error("cannot {attempted} a session that is {from}")]
    InvalidTransition {
        /// State the controller was in
        from: SessionState,
        /// The operation that was attempted
        attempted: &'static str,
    },
}

/// Server-computed route figures applied onto a live session.
///
/// The decoded path is always rendered; the scalar figures, when
/// present, become authoritative and freeze the live-computed values
/// for the remainder of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOverride {
    /// Decoded route path from the routing service
    pub path: Vec<Coordinate>,
    /// Authoritative total distance, if provided
    pub distance_km: Option<f64>,
    /// Authoritative duration, if provided
    pub duration_seconds: Option<u64>,
    /// Authoritative human energy figure, if provided
    pub human_kcal: Option<u32>,
    /// Authoritative summed companion energy figure, if provided
    pub companion_kcal_total: Option<u32>,
}

impl RouteOverride {
    fn has_scalar_figures(&self) -> bool {
        self.distance_km.is_some()
            || self.duration_seconds.is_some()
            || self.human_kcal.is_some()
            || self.companion_kcal_total.is_some()
    }
}

/// One tracked walk or run, from start to stop/reset.
///
/// Created by [`SessionController::start`], mutated only through the
/// controller, destroyed on reset or finalize.
#[derive(Debug, Clone)]
pub struct Session {
    activity_kind: ActivityKind,
    started_at: DateTime<Utc>,
    elapsed_seconds: u64,
    positions: Vec<Coordinate>,
    distance_km: f64,
    human_kcal: u32,
    companion_kcal_total: u32,
    destination: Option<Coordinate>,
    server_route: Option<Vec<Coordinate>>,
    /// Once the routing service supplies figures, live recomputation
    /// stops clobbering them.
    server_authoritative: bool,
    completed: bool,
}

impl Session {
    fn new(activity_kind: ActivityKind, origin: Option<Coordinate>) -> Self {
        Self {
            activity_kind,
            started_at: Utc::now(),
            elapsed_seconds: 0,
            positions: origin.into_iter().collect(),
            distance_km: 0.0,
            human_kcal: 0,
            companion_kcal_total: 0,
            destination: None,
            server_route: None,
            server_authoritative: false,
            completed: false,
        }
    }

    /// Activity kind fixed at start
    #[must_use]
    pub const fn activity_kind(&self) -> ActivityKind {
        self.activity_kind
    }

    /// When the session started (UTC)
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed whole seconds
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Elapsed time as fractional hours
    #[must_use]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_seconds as f64 / SECONDS_PER_HOUR
    }

    /// The live-tracked path, in chronological order
    #[must_use]
    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    /// Accumulated distance in kilometers
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Current human energy estimate in kcal
    #[must_use]
    pub const fn human_kcal(&self) -> u32 {
        self.human_kcal
    }

    /// Current summed companion energy estimate in kcal
    #[must_use]
    pub const fn companion_kcal_total(&self) -> u32 {
        self.companion_kcal_total
    }

    /// The chosen destination, if any
    #[must_use]
    pub const fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    /// The server-computed route, rendered distinctly from the
    /// live-tracked path
    #[must_use]
    pub fn server_route(&self) -> Option<&[Coordinate]> {
        self.server_route.as_deref()
    }

    fn recompute_energy(&mut self, companions: &[AnimalProfile]) {
        let hours = self.elapsed_hours();
        self.human_kcal = energy::human_kcal(self.activity_kind, hours);
        self.companion_kcal_total =
            energy::companion_kcal_total(companions, hours, self.distance_km, self.activity_kind);
    }
}

/// Owns and drives the single live session.
///
/// At most one session exists at a time. The companion *selection* is
/// sticky across sessions; the per-session derived totals are not.
#[derive(Debug, Default)]
pub struct SessionController {
    session: Option<Session>,
    companions: Vec<AnimalProfile>,
    /// Bumped whenever the session starts, stops, or resets; lets the
    /// async driver discard route responses that arrive late.
    epoch: u64,
}

impl SessionController {
    /// Create an idle controller with no companions selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::Idle,
            Some(session) if session.completed => SessionState::Completed,
            Some(_) => SessionState::Active,
        }
    }

    /// The live session, if one exists (Active or Completed)
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Epoch counter for stale-response detection
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The sticky companion selection
    #[must_use]
    pub fn companions(&self) -> &[AnimalProfile] {
        &self.companions
    }

    /// Replace the companion selection.
    ///
    /// Valid in any state; an active session's companion energy total
    /// is recomputed immediately so a profile edit or deletion shows
    /// up on the next read.
    pub fn set_companions(&mut self, companions: Vec<AnimalProfile>) {
        self.companions = companions;
        let Self {
            session,
            companions,
            ..
        } = self;
        if let Some(session) = session.as_mut() {
            if !session.completed && !session.server_authoritative {
                session.recompute_energy(companions);
            }
        }
    }

    /// Start a session.
    ///
    /// Valid only from Idle. A non-finite origin is dropped (the path
    /// then begins at the first valid position update).
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Idle.
    pub fn start(
        &mut self,
        activity_kind: ActivityKind,
        origin: Coordinate,
    ) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::InvalidTransition {
                from: self.state(),
                attempted: "start",
            });
        }
        let origin = if origin.is_finite() {
            Some(origin)
        } else {
            debug!("dropping non-finite origin coordinate at session start");
            None
        };
        self.session = Some(Session::new(activity_kind, origin));
        self.epoch += 1;
        Ok(())
    }

    /// Advance the session clock by one second and refresh energies.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Active.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        let (session, companions) = self.active_parts("tick")?;
        if session.server_authoritative {
            return Ok(());
        }
        session.elapsed_seconds += 1;
        session.recompute_energy(companions);
        Ok(())
    }

    /// Record a device position.
    ///
    /// Appends to the path, extends the accumulated distance by the
    /// great-circle step from the previous point, and refreshes
    /// energies. Non-finite coordinates are dropped silently; device
    /// sensors occasionally emit garbage.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Active.
    pub fn on_position(&mut self, position: Coordinate) -> Result<(), SessionError> {
        let (session, companions) = self.active_parts("record a position for")?;
        if !position.is_finite() {
            debug!(
                latitude = position.latitude,
                longitude = position.longitude,
                "dropping non-finite position sample"
            );
            return Ok(());
        }
        let previous = session.positions.last().copied();
        session.positions.push(position);
        if session.server_authoritative {
            return Ok(());
        }
        if let Some(previous) = previous {
            session.distance_km += geo::distance_km(previous, position);
        }
        session.recompute_energy(companions);
        Ok(())
    }

    /// Choose a destination for a server route request.
    ///
    /// Picking a new destination invalidates any previously applied
    /// server route path.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Active.
    pub fn set_destination(&mut self, destination: Coordinate) -> Result<(), SessionError> {
        let (session, _) = self.active_parts("set a destination for")?;
        if !destination.is_finite() {
            debug!("dropping non-finite destination coordinate");
            return Ok(());
        }
        session.destination = Some(destination);
        session.server_route = None;
        Ok(())
    }

    /// Apply a decoded server route onto the live session.
    ///
    /// The path renders alongside the live-tracked one. When the
    /// response carries authoritative distance/time/energy figures,
    /// they replace the live-computed values and stay frozen for the
    /// remainder of the session.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Active.
    pub fn apply_route(&mut self, route: RouteOverride) -> Result<(), SessionError> {
        let (session, _) = self.active_parts("apply a route to")?;
        let authoritative = route.has_scalar_figures();
        session.server_route = Some(route.path);
        if let Some(distance_km) = route.distance_km {
            session.distance_km = distance_km;
        }
        if let Some(duration_seconds) = route.duration_seconds {
            session.elapsed_seconds = duration_seconds;
        }
        if let Some(human_kcal) = route.human_kcal {
            session.human_kcal = human_kcal;
        }
        if let Some(companion_kcal) = route.companion_kcal_total {
            session.companion_kcal_total = companion_kcal;
        }
        session.server_authoritative = session.server_authoritative || authoritative;
        Ok(())
    }

    /// Stop the session, freezing every derived value.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Active.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        let (session, _) = self.active_parts("stop")?;
        session.completed = true;
        self.epoch += 1;
        Ok(())
    }

    /// Whether the session carries anything worth persisting
    #[must_use]
    pub fn is_worth_saving(&self) -> bool {
        self.session.as_ref().is_some_and(|session| {
            session.elapsed_seconds > 0
                && (session.distance_km > 0.0 || session.human_kcal > 0)
        })
    }

    /// Convert the completed session into a persistable record and
    /// return to Idle.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless Completed.
    pub fn finalize(&mut self) -> Result<RunningRecord, SessionError> {
        if self.state() != SessionState::Completed {
            return Err(SessionError::InvalidTransition {
                from: self.state(),
                attempted: "finalize",
            });
        }
        let Some(session) = self.session.take() else {
            // Unreachable: Completed implies a session exists.
            return Err(SessionError::InvalidTransition {
                from: SessionState::Idle,
                attempted: "finalize",
            });
        };
        self.epoch += 1;
        Ok(RunningRecord::from_metrics(
            session.elapsed_seconds,
            session.distance_km,
            session.human_kcal,
            session.companion_kcal_total,
        ))
    }

    /// Discard the session without persisting, from Active or
    /// Completed.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] from Idle.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.session.take().is_none() {
            return Err(SessionError::InvalidTransition {
                from: SessionState::Idle,
                attempted: "reset",
            });
        }
        self.epoch += 1;
        Ok(())
    }

    /// Split-borrow helper: the active session plus the companion
    /// selection, or the transition error for `attempted`.
    fn active_parts(
        &mut self,
        attempted: &'static str,
    ) -> Result<(&mut Session, &[AnimalProfile]), SessionError> {
        let from = self.state();
        let Self {
            session,
            companions,
            ..
        } = self;
        match session.as_mut() {
            Some(session) if from == SessionState::Active => Ok((session, companions.as_slice())),
            _ => Err(SessionError::InvalidTransition { from, attempted }),
        }
    }
}
