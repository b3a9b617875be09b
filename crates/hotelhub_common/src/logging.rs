//! Logging utilities for the Hotelhub application.
//!
//! This module provides a standardized approach to logging across all crates
//! in the workspace. It installs a `tracing` subscriber that writes to stdout
//! and, when a log directory is configured, to a daily rolling file.

use hotelhub_config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Target prefix shared by every crate in the workspace.
const TARGET_PREFIX: &str = "hotelhub";

/// Initialize the tracing subscriber at INFO level.
///
/// # Examples
///
/// ```
/// use hotelhub_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; the given level is added as a directive for the
/// workspace crates. Calling this more than once is harmless.
pub fn init_with_level(level: Level) {
    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the application configuration.
///
/// Unknown level names fall back to INFO. When `directory` is set, a daily
/// rolling file named `hotelhub.log` is written there as well; the returned
/// guard must be kept alive for the lifetime of the process so buffered
/// lines get flushed.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let parsed = Level::from_str(&config.level).ok();
    let level = parsed.unwrap_or(Level::INFO);

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "hotelhub.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(stdout_layer())
        .with(file_layer)
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
        if parsed.is_none() {
            warn!("Unknown log level '{}', using INFO", config.level);
        }
    }

    guard
}

fn stdout_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
}

fn filter_for(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("{}={}", TARGET_PREFIX, level).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
