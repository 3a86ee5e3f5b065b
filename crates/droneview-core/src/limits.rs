//! Operator-configurable flight limits.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::units::{km_to_statute_miles, mps_to_knots};

/// Operating limits consumed by the safety assessor.
///
/// Wind limits are stored in m/s and visibility in km. Observations are
/// compared in knots and statute miles, so the limit is converted at
/// comparison time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum sustained wind in m/s
    pub max_wind_speed: f64,
    /// Maximum gust in m/s
    pub max_wind_gust: f64,
    /// Minimum visibility in km
    pub min_visibility: f64,
    /// Minimum air temperature in °C
    pub min_temperature: f64,
    /// Maximum air temperature in °C
    pub max_temperature: f64,
    /// Maximum relative humidity in percent
    pub max_humidity: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_wind_speed: 10.0,
            max_wind_gust: 15.0,
            min_visibility: 3.0,
            min_temperature: -10.0,
            max_temperature: 40.0,
            max_humidity: 95.0,
        }
    }
}

impl Limits {
    /// Sustained wind limit in knots.
    pub fn max_wind_speed_kt(&self) -> f64 {
        mps_to_knots(self.max_wind_speed)
    }

    /// Gust limit in knots.
    pub fn max_wind_gust_kt(&self) -> f64 {
        mps_to_knots(self.max_wind_gust)
    }

    /// Visibility minimum in statute miles.
    pub fn min_visibility_mi(&self) -> f64 {
        km_to_statute_miles(self.min_visibility)
    }

    /// Check that the limits describe a usable envelope.
    ///
    /// The assessor accepts any values; this is for settings input.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_wind_speed", self.max_wind_speed),
            ("max_wind_gust", self.max_wind_gust),
            ("min_visibility", self.min_visibility),
            ("min_temperature", self.min_temperature),
            ("max_temperature", self.max_temperature),
            ("max_humidity", self.max_humidity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::InvalidLimit {
                    field,
                    reason: "must be a finite number".to_string(),
                });
            }
        }

        for (field, value) in [
            ("max_wind_speed", self.max_wind_speed),
            ("max_wind_gust", self.max_wind_gust),
            ("min_visibility", self.min_visibility),
        ] {
            if value < 0.0 {
                return Err(CoreError::InvalidLimit {
                    field,
                    reason: format!("cannot be negative (got {})", value),
                });
            }
        }

        if self.min_temperature >= self.max_temperature {
            return Err(CoreError::InvalidLimit {
                field: "min_temperature",
                reason: format!(
                    "must be below max_temperature ({} >= {})",
                    self.min_temperature, self.max_temperature
                ),
            });
        }

        if !(0.0..=100.0).contains(&self.max_humidity) {
            return Err(CoreError::InvalidLimit {
                field: "max_humidity",
                reason: format!("must be within 0-100 (got {})", self.max_humidity),
            });
        }

        Ok(())
    }
}
