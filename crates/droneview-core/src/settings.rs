//! Persisted operator settings (selected airport, presets, limits).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::airports::{normalize_icao, PresetBook, DEFAULT_AIRPORT};
use crate::assessment::{SafetyAssessor, UnknownConditionPolicy};
use crate::error::{CoreError, Result};
use crate::limits::Limits;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub current_airport: String,
    pub use_presets: bool,
    pub presets: PresetBook,
    pub limits: Limits,
    pub unknown_conditions: UnknownConditionPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_airport: DEFAULT_AIRPORT.to_string(),
            use_presets: true,
            presets: PresetBook::default(),
            limits: Limits::default(),
            unknown_conditions: UnknownConditionPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw =
            fs::read_to_string(path).map_err(|err| CoreError::SettingsIo(path.to_path_buf(), err))?;
        let settings: Settings = serde_json::from_str(&raw)
            .map_err(|err| CoreError::SettingsFormat(path.to_path_buf(), err))?;
        settings.limits.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|err| CoreError::SettingsIo(parent.to_path_buf(), err))?;
        }
        let body = serde_json::to_string_pretty(self)
            .map_err(|err| CoreError::SettingsFormat(path.to_path_buf(), err))?;
        fs::write(path, body).map_err(|err| CoreError::SettingsIo(path.to_path_buf(), err))?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Selected station, `KDFW` when unset.
    pub fn selected_airport(&self) -> &str {
        let current = self.current_airport.trim();
        if current.is_empty() {
            DEFAULT_AIRPORT
        } else {
            current
        }
    }

    pub fn set_current_airport(&mut self, code: &str) -> Result<()> {
        self.current_airport = normalize_icao(code)?;
        Ok(())
    }

    pub fn set_limits(&mut self, limits: Limits) -> Result<()> {
        limits.validate()?;
        self.limits = limits;
        Ok(())
    }

    /// Build an assessor configured from these settings.
    pub fn assessor(&self) -> SafetyAssessor {
        SafetyAssessor::new(self.limits).with_unknown_condition_policy(self.unknown_conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::AirportPreset;

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("droneview-settings-{}", uuid::Uuid::new_v4()))
            .join("settings.json")
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = Settings::load(&temp_path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.selected_airport(), "KDFW");
        assert!(settings.use_presets);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path();
        let mut settings = Settings::default();
        settings.set_current_airport(" ksea").unwrap();
        settings
            .presets
            .add(AirportPreset::new("Waterfront", "KSEA", "Pier 66").unwrap())
            .unwrap();
        settings
            .set_limits(Limits {
                max_wind_speed: 8.0,
                ..Limits::default()
            })
            .unwrap();
        settings.unknown_conditions = UnknownConditionPolicy::Cautious;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.selected_airport(), "KSEA");
        assert_eq!(
            loaded.assessor().unknown_condition_policy(),
            UnknownConditionPolicy::Cautious
        );

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_blank_airport_falls_back() {
        let settings = Settings {
            current_airport: "  ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.selected_airport(), "KDFW");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::SettingsFormat(_, _)));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let mut settings = Settings::default();
        let result = settings.set_limits(Limits {
            max_humidity: 150.0,
            ..Limits::default()
        });
        assert!(result.is_err());
        assert_eq!(settings.limits, Limits::default());
    }
}
