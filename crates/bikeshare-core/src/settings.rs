use clap::Parser;
use std::path::{Path, PathBuf};

use crate::models::City;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive explorer for US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Interactive explorer for US bikeshare trip data",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Rows shown per raw-data page (1-100)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when absent)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Settings::load`] but over an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Path of the CSV backing `city` under the configured data directory.
    pub fn city_path(&self, city: City) -> PathBuf {
        city_path_in(&self.data_dir, city)
    }

    /// Page size as a `usize` window length.
    pub fn page_len(&self) -> usize {
        usize::from(self.page_size)
    }
}

/// Path of the CSV backing `city` under `data_dir`.
pub fn city_path_in(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
