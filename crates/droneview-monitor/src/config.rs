//! Monitor configuration from environment.

use std::env;
use std::path::PathBuf;

use droneview_metar::DEFAULT_BASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Stations to watch; empty means resolve from coordinates or settings.
    pub stations: Vec<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub poll_interval_secs: u64,
    pub settings_path: Option<PathBuf>,
    pub feed_capacity: usize,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("DRONEVIEW_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            stations: lookup("DRONEVIEW_STATION")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_ascii_uppercase())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            lat: lookup("DRONEVIEW_LAT").and_then(|s| s.trim().parse().ok()),
            lon: lookup("DRONEVIEW_LON").and_then(|s| s.trim().parse().ok()),
            poll_interval_secs: lookup("DRONEVIEW_POLL_SECS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(300),
            settings_path: lookup("DRONEVIEW_SETTINGS_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            feed_capacity: lookup("DRONEVIEW_FEED_CAPACITY")
                .and_then(|s| s.trim().parse().ok())
                .filter(|cap| *cap > 0)
                .unwrap_or(64),
            log_json: lookup("DRONEVIEW_LOG_JSON")
                .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert!(config.stations.is_empty());
        assert_eq!(config.poll_interval_secs, 300);
        assert_eq!(config.feed_capacity, 64);
        assert!(config.coordinates().is_none());
        assert!(config.settings_path.is_none());
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DRONEVIEW_STATION", "kdfw, KSEA,,"),
            ("DRONEVIEW_LAT", "32.9"),
            ("DRONEVIEW_LON", "-97.0"),
            ("DRONEVIEW_POLL_SECS", "60"),
            ("DRONEVIEW_SETTINGS_PATH", "/tmp/droneview.json"),
            ("DRONEVIEW_LOG_JSON", "true"),
        ]);
        assert_eq!(config.stations, vec!["KDFW", "KSEA"]);
        assert_eq!(config.coordinates(), Some((32.9, -97.0)));
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.settings_path, Some(PathBuf::from("/tmp/droneview.json")));
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("DRONEVIEW_POLL_SECS", "0"),
            ("DRONEVIEW_FEED_CAPACITY", "lots"),
            ("DRONEVIEW_LAT", "north"),
        ]);
        assert_eq!(config.poll_interval_secs, 300);
        assert_eq!(config.feed_capacity, 64);
        assert!(config.lat.is_none());
    }
}
