//! DroneView CLI - command line tools for flight-condition checks.
//!
//! Binaries:
//! - assess: assess a weather snapshot given on the command line or in a file
//! - fetch_weather: fetch live METAR/TAF and assess it
//! - plan_flight: distance, time and battery estimate for an out-and-back flight
//! - airports: manage the selected airport and presets

pub mod render;

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use droneview_core::Settings;

pub const SETTINGS_ENV: &str = "DRONEVIEW_SETTINGS_PATH";

/// `$DRONEVIEW_SETTINGS_PATH`, else `droneview/settings.json` under the platform
/// config directory, else `droneview-settings.json` in the working directory.
pub fn default_settings_path() -> PathBuf {
    settings_path_from(std::env::var_os(SETTINGS_ENV), dirs::config_dir())
}

fn settings_path_from(env_override: Option<OsString>, config_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    config_dir
        .map(|dir| dir.join("droneview").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("droneview-settings.json"))
}

pub fn load_settings(path: Option<&Path>) -> Result<(PathBuf, Settings)> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_settings_path);
    let settings = Settings::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    Ok((path, settings))
}

/// Log to stderr, `warn` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_path_override_wins() {
        let path = settings_path_from(
            Some(OsString::from("/tmp/custom.json")),
            Some(PathBuf::from("/home/pilot/.config")),
        );
        assert_eq!(path, PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn test_settings_path_under_config_dir() {
        let path = settings_path_from(Some(OsString::new()), Some(PathBuf::from("/cfg")));
        assert_eq!(path, PathBuf::from("/cfg/droneview/settings.json"));
    }

    #[test]
    fn test_settings_path_without_config_dir() {
        assert_eq!(
            settings_path_from(None, None),
            PathBuf::from("droneview-settings.json")
        );
    }
}
