//! Structured logging initialisation for the Aegis miner.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`] — coloured, human-readable lines (development).
//! - [`LogFormat::Json`] — newline-delimited JSON (production / log aggregation).
//!
//! When a log directory is configured, a JSON copy of the stream is also
//! appended to `miner.log` inside it. The filter level can be overridden
//! at runtime via the `RUST_LOG` environment variable; when `RUST_LOG` is
//! not set, the caller-supplied `level` string is used (e.g. `"info"`,
//! `"debug,aegis_miner=trace"`).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::MinerError;

/// Log file name inside the configured log directory.
const LOG_FILE: &str = "miner.log";

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty-printed, coloured output for local development.
    Human,
    /// Newline-delimited JSON for production and log aggregation pipelines.
    Json,
}

impl LogFormat {
    /// Parse a config string; anything unrecognised falls back to human.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

/// The stdout layer plus, when a log directory is given, a JSON file layer.
///
/// The two formats produce differently-typed `fmt` layers, so both are
/// erased to `Box<dyn Layer<Registry>>` before composition.
fn build_layers(
    format: LogFormat,
    log_dir: Option<&Path>,
) -> Result<Vec<Box<dyn Layer<Registry> + Send + Sync>>, MinerError> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    layers.push(match format {
        LogFormat::Human => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
    });

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))?;
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .boxed(),
        );
    }

    Ok(layers)
}

/// Initialise the global tracing subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (i.e. this function
/// was called twice in the same process).
pub fn init_logging(
    format: LogFormat,
    level: &str,
    log_dir: Option<&Path>,
) -> Result<(), MinerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(build_layers(format, log_dir)?)
        .with(filter)
        .init();

    Ok(())
}
