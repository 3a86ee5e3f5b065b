//! Weather data models shared between the fetcher, the assessor and displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of forecast periods kept on a report.
pub const MAX_FORECAST_PERIODS: usize = 24;

/// The six observation fields read by the safety assessor.
///
/// Units follow the aviation weather provider: wind in knots, visibility in
/// statute miles, temperature in °C, humidity in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub wind_speed_kt: f64,
    #[serde(default)]
    pub wind_gust_kt: f64,
    pub visibility_mi: f64,
    pub temperature_c: f64,
    #[serde(default)]
    pub humidity_pct: f64,
    /// Free-form sky/precipitation description
    #[serde(default)]
    pub condition: String,
}

impl WeatherSnapshot {
    /// Create a snapshot with calm, clear defaults for everything but wind.
    pub fn new(wind_speed_kt: f64, visibility_mi: f64, temperature_c: f64) -> Self {
        Self {
            wind_speed_kt,
            wind_gust_kt: 0.0,
            visibility_mi,
            temperature_c,
            humidity_pct: 50.0,
            condition: String::new(),
        }
    }

    pub fn with_gust(mut self, wind_gust_kt: f64) -> Self {
        self.wind_gust_kt = wind_gust_kt;
        self
    }

    pub fn with_humidity(mut self, humidity_pct: f64) -> Self {
        self.humidity_pct = humidity_pct;
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }
}

/// Flight category reported with a METAR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightCategory {
    Vfr,
    Mvfr,
    Ifr,
    Lifr,
    Other(String),
}

impl FlightCategory {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "VFR" => FlightCategory::Vfr,
            "MVFR" => FlightCategory::Mvfr,
            "IFR" => FlightCategory::Ifr,
            "LIFR" => FlightCategory::Lifr,
            _ => FlightCategory::Other(code.trim().to_string()),
        }
    }

    /// Sky-condition text used as the assessor's condition input.
    pub fn condition_text(&self) -> &str {
        match self {
            FlightCategory::Vfr => "Clear",
            FlightCategory::Mvfr => "Partly Cloudy",
            FlightCategory::Ifr => "Cloudy",
            FlightCategory::Lifr => "Poor Visibility",
            FlightCategory::Other(raw) => raw,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            FlightCategory::Vfr => "VFR",
            FlightCategory::Mvfr => "MVFR",
            FlightCategory::Ifr => "IFR",
            FlightCategory::Lifr => "LIFR",
            FlightCategory::Other(raw) => raw,
        }
    }
}

/// One TAF forecast period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub time: Option<DateTime<Utc>>,
    pub condition: String,
    pub temperature_c: Option<f64>,
    pub wind_speed_kt: f64,
    pub wind_direction_deg: Option<f64>,
}

/// Full METAR/TAF-derived observation for a station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub station_id: String,
    /// e.g. "Station KDFW (32.8968, -97.0380)"
    pub location: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
    pub raw_metar: String,
    pub raw_taf: Option<String>,
    pub temperature_c: f64,
    pub dewpoint_c: Option<f64>,
    pub humidity_pct: f64,
    pub pressure_hpa: Option<f64>,
    pub altimeter_inhg: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub wind_speed_kt: f64,
    pub wind_gust_kt: f64,
    pub visibility_mi: f64,
    pub flight_category: Option<FlightCategory>,
    pub condition: String,
    pub sky_cover: String,
    pub ceiling_ft: Option<f64>,
    pub forecast: Vec<ForecastPeriod>,
}

impl WeatherReport {
    /// Project the fields the assessor consumes.
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            wind_speed_kt: self.wind_speed_kt,
            wind_gust_kt: self.wind_gust_kt,
            visibility_mi: self.visibility_mi,
            temperature_c: self.temperature_c,
            humidity_pct: self.humidity_pct,
            condition: self.condition.clone(),
        }
    }

    pub fn format_wind(&self) -> String {
        match self.wind_direction_deg {
            Some(direction) => format!(
                "{:03.0}° ({}) at {:.0} kts, gusts {:.0} kts",
                direction,
                wind_direction_to_cardinal(direction),
                self.wind_speed_kt,
                self.wind_gust_kt
            ),
            None => format!(
                "Variable at {:.0} kts, gusts {:.0} kts",
                self.wind_speed_kt, self.wind_gust_kt
            ),
        }
    }
}

/// 16-point compass label for a wind direction in degrees.
pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
    const POINTS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];
    if !degrees.is_finite() {
        return "Unknown";
    }
    let index = ((degrees.rem_euclid(360.0) / 22.5) + 0.5).floor() as usize % POINTS.len();
    POINTS[index]
}
