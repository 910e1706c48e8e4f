use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use bikeshare_core::models::City;
use bikeshare_core::settings::city_path_in;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to a `tracing` filter directive.
///
/// Unrecognised names pass through unchanged so `EnvFilter` can still accept
/// raw directives.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr, or to `log_file` (appended, no ANSI colours) when one
/// is given. Stdout is left to the interactive session.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_target(false),
            )
        }
        None => None,
    };

    let stderr_layer = file_layer.is_none().then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

// ── Data-directory check ───────────────────────────────────────────────────────

/// City CSVs that are absent from `data_dir`, in city order.
///
/// A missing file is only fatal once that city is selected, so this is used
/// for an early warning.
pub fn missing_city_files(data_dir: &Path) -> Vec<PathBuf> {
    City::ALL
        .into_iter()
        .map(|city| city_path_in(data_dir, city))
        .filter(|path| !path.is_file())
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
