//! Command-line configuration.

use super::simulated_location::{DEFAULT_FIX, SimulationConfig};
use crate::domain::{AuthorizationStatus, Position};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "coffeefinder";
const PREFERENCES_FILE: &str = "preferences.json";

/// Find coffee shops near you, from the terminal.
#[derive(Debug, Parser)]
#[command(name = "coffeefinder", version)]
pub struct Cli {
    /// Location permission the simulated platform starts with
    /// (undetermined, granted, denied, restricted)
    #[arg(long, default_value = "undetermined")]
    pub status: AuthorizationStatus,

    /// Simulated position fix as LAT,LON. Repeat to replay a route.
    #[arg(long = "at", value_name = "LAT,LON", allow_hyphen_values = true)]
    pub route: Vec<Position>,

    /// Milliseconds between simulated fixes
    #[arg(long, default_value_t = 2000)]
    pub fix_interval_ms: u64,

    /// Number of simulated fixes that fail before the first success
    #[arg(long, default_value_t = 0)]
    pub failed_fixes: u32,

    /// Preferences file [default: <config dir>/coffeefinder/preferences.json]
    #[arg(long, env = "COFFEEFINDER_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Directory for log files [default: <data dir>/coffeefinder/logs]
    #[arg(long, env = "COFFEEFINDER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Resolved startup settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub preferences_path: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let route = if cli.route.is_empty() {
            vec![DEFAULT_FIX]
        } else {
            cli.route
        };

        Self {
            simulation: SimulationConfig {
                initial_status: cli.status,
                route,
                fix_interval: Duration::from_millis(cli.fix_interval_ms),
                failed_fixes: cli.failed_fixes,
            },
            preferences_path: cli.prefs.unwrap_or_else(default_preferences_path),
            log_dir: cli.log_dir.unwrap_or_else(default_log_dir),
        }
    }
}

pub fn default_preferences_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(PREFERENCES_FILE)
}

pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}
