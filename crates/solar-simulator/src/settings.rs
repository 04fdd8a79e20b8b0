//! Environment configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.

use std::env;
use std::path::PathBuf;

use solar_core::config::DashboardConfig;

/// Directory used for PNG fallbacks and the bundle snapshot
const DEFAULT_OUTPUT_DIR: &str = "solar-output";

#[derive(Debug, Clone)]
pub struct Settings {
    pub dashboard: DashboardConfig,
    pub output_dir: PathBuf,
    pub series_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let defaults = DashboardConfig::default();
        Ok(Settings {
            dashboard: DashboardConfig {
                data_cache_minutes: number_var(
                    "SOLAR_DATA_CACHE_MINUTES",
                    defaults.data_cache_minutes,
                )?,
                screen_timeout_minutes: number_var(
                    "SOLAR_SCREEN_TIMEOUT_MINUTES",
                    defaults.screen_timeout_minutes,
                )?,
                window_days: number_var("SOLAR_WINDOW_DAYS", defaults.window_days)?,
            },
            output_dir: env::var("SOLAR_OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string())
                .into(),
            series_file: env::var("SOLAR_SERIES_FILE").ok().map(PathBuf::from),
        })
    }

    /// Where the last fetched bundle is persisted
    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join("solar_bundle.bin")
    }
}

fn number_var(name: &str, default: u32) -> Result<u32, Box<dyn std::error::Error>> {
    parse_or(env::var(name).ok().as_deref(), default)
        .map_err(|err| format!("{name}: {err}").into())
}

fn parse_or(raw: Option<&str>, default: u32) -> Result<u32, std::num::ParseIntError> {
    match raw {
        Some(value) => value.trim().parse(),
        None => Ok(default),
    }
}
