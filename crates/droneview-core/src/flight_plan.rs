//! Flight planning: out-and-back distance, duration and battery estimates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::spatial::haversine_distance;
use crate::units::{meters_to_feet, METERS_PER_STATUTE_MILE};

/// Default battery endurance assumed for estimates (minutes).
pub const DEFAULT_BATTERY_ENDURANCE_MIN: f64 = 20.0;

const FEET_PER_MILE: f64 = 5280.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanWaypoint {
    pub position: GeoPoint,
    pub altitude_m: f64,
    #[serde(default)]
    pub action: String,
    /// Loiter time at the waypoint (seconds)
    #[serde(default)]
    pub duration_secs: u32,
}

/// A planned out-and-back flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub home: GeoPoint,
    pub target: GeoPoint,
    pub altitude_m: f64,
    /// Cruise speed in m/s
    pub speed_mps: f64,
    pub planned_start: DateTime<Utc>,
    #[serde(default)]
    pub drone_type: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub waypoints: Vec<PlanWaypoint>,
}

/// How hard the plan pushes the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryLevel {
    Nominal,
    Elevated,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEstimate {
    /// One-way distance home -> target (meters)
    pub distance_m: f64,
    /// Round-trip flight time (seconds)
    pub round_trip_secs: u64,
    /// Share of battery used, capped at 100
    pub battery_usage_pct: u32,
    pub battery_level: BatteryLevel,
}

impl FlightPlan {
    pub fn distance_m(&self) -> f64 {
        self.home.distance_to(&self.target)
    }

    /// Estimate an out-and-back flight at cruise speed.
    pub fn estimate(&self, battery_endurance_min: f64) -> Result<FlightEstimate> {
        if !(self.speed_mps.is_finite() && self.speed_mps > 0.0) {
            return Err(CoreError::InvalidSpeed(self.speed_mps));
        }

        let distance_m = self.distance_m();
        let one_way_secs = (distance_m / self.speed_mps).floor() as u64;
        let round_trip_secs = one_way_secs * 2;

        let endurance = if battery_endurance_min > 0.0 {
            battery_endurance_min
        } else {
            DEFAULT_BATTERY_ENDURANCE_MIN
        };
        let usage = ((round_trip_secs as f64 / 60.0) / endurance * 100.0).floor() as u64;
        let battery_level = if usage > 80 {
            BatteryLevel::Critical
        } else if usage > 60 {
            BatteryLevel::Elevated
        } else {
            BatteryLevel::Nominal
        };

        Ok(FlightEstimate {
            distance_m,
            round_trip_secs,
            battery_usage_pct: usage.min(100) as u32,
            battery_level,
        })
    }
}

/// Feet below one statute mile, miles above.
pub fn format_distance(distance_m: f64) -> String {
    let feet = meters_to_feet(distance_m);
    if feet < FEET_PER_MILE {
        format!("{:.0} ft", feet)
    } else {
        format!("{:.2} mi", distance_m / METERS_PER_STATUTE_MILE)
    }
}

pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}
