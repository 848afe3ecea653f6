// ABOUTME: Logging configuration and structured logging setup
// ABOUTME: Configures tracing-subscriber with env-filter and pretty/compact/json output
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Packwalk contributors

//! Structured logging setup.
//!
//! The engine itself only emits `tracing` events; embedding
//! applications call [`init`] once at startup (or install their own
//! subscriber and skip this module entirely).

use packwalk_core::{AppError, AppResult};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output for terminals
    #[default]
    Compact,
    /// JSON lines for log collectors
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. `info`,
    /// `packwalk=debug`)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Read `PACKWALK_LOG_LEVEL` and `PACKWALK_LOG_FORMAT` with
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("PACKWALK_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
        let format = match env::var("PACKWALK_LOG_FORMAT").as_deref() {
            Ok("pretty") => LogFormat::Pretty,
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };
        Self { level, format }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured default level.
///
/// # Errors
///
/// Returns `AppError::config` when the filter directive is invalid or
/// a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::config(format!("invalid log filter '{}': {e}", config.level)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_target(false),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    result.map_err(|e| AppError::config(format!("failed to install tracing subscriber: {e}")))
}
