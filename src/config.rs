// ABOUTME: Environment configuration management for the Packwalk engine
// ABOUTME: Reads PACKWALK_* variables with defaults for routing, storage, and tracking
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Packwalk contributors

//! Environment-based configuration.
//!
//! The engine is configured entirely through environment variables;
//! every setting has a workable default so `EngineConfig::from_env()`
//! succeeds on a bare machine.

use packwalk_core::{AppError, AppResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default routing service endpoint
const DEFAULT_ROUTING_BASE_URL: &str = "https://api.packwalk.app";
/// Default routing request timeout in seconds
const DEFAULT_ROUTING_TIMEOUT_SECS: u64 = 8;
/// Default minimum interval between position samples, seconds
const DEFAULT_POSITION_INTERVAL_SECS: u64 = 3;
/// Default minimum displacement between position samples, meters
const DEFAULT_POSITION_DISPLACEMENT_M: f64 = 5.0;

/// Routing service settings
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the routing service
    pub base_url: String,
    /// Per-request timeout; a timed-out request leaves the live
    /// session untouched
    pub timeout: Duration,
}

/// Durable storage settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the engine's JSON storage keys
    pub data_dir: PathBuf,
}

/// Hints passed to the position source when subscribing
#[derive(Debug, Clone, Copy)]
pub struct TrackingConfig {
    /// Minimum interval between position samples
    pub position_interval: Duration,
    /// Minimum displacement between position samples, meters
    pub position_displacement_m: f64,
}

/// Complete engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Routing service settings
    pub routing: RoutingConfig,
    /// Durable storage settings
    pub storage: StorageConfig,
    /// Position source subscription hints
    pub tracking: TrackingConfig,
}

impl EngineConfig {
    /// Load configuration from `PACKWALK_*` environment variables,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::config` when a variable is present but
    /// unparseable, or the routing base URL is not a valid URL.
    pub fn from_env() -> AppResult<Self> {
        let base_url =
            env_or("PACKWALK_ROUTING_BASE_URL", DEFAULT_ROUTING_BASE_URL);
        Url::parse(&base_url).map_err(|e| {
            AppError::config(format!("PACKWALK_ROUTING_BASE_URL is not a valid URL: {e}"))
        })?;

        let timeout_secs = parse_env("PACKWALK_ROUTING_TIMEOUT_SECS", DEFAULT_ROUTING_TIMEOUT_SECS)?;
        let interval_secs =
            parse_env("PACKWALK_POSITION_INTERVAL_SECS", DEFAULT_POSITION_INTERVAL_SECS)?;
        let displacement_m = parse_env(
            "PACKWALK_POSITION_DISPLACEMENT_M",
            DEFAULT_POSITION_DISPLACEMENT_M,
        )?;

        Ok(Self {
            routing: RoutingConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            storage: StorageConfig {
                data_dir: data_dir_from_env(),
            },
            tracking: TrackingConfig {
                position_interval: Duration::from_secs(interval_secs),
                position_displacement_m: displacement_m,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::config(format!("{key} is invalid: {e}"))),
        Err(_) => Ok(default),
    }
}

fn data_dir_from_env() -> PathBuf {
    env::var("PACKWALK_DATA_DIR").map_or_else(
        |_| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("packwalk")
        },
        PathBuf::from,
    )
}
