//! DroneView core - flight-condition safety assessment for drone operators.
//!
//! Pure domain logic shared by the METAR client, the monitor and the CLI.

pub mod airports;
pub mod assessment;
pub mod error;
pub mod feed;
pub mod flight_plan;
pub mod limits;
pub mod models;
pub mod settings;
pub mod spatial;
pub mod units;

pub use airports::{
    find_airport, nearest_airport, normalize_icao, Airport, AirportPreset, PresetBook,
    DEFAULT_AIRPORT, MAJOR_AIRPORTS,
};
pub use assessment::{FlightAssessment, HazardVerdict, SafetyAssessor, UnknownConditionPolicy};
pub use error::CoreError;
pub use feed::{AssessmentFeed, AssessmentObserver, SubscriptionId};
pub use flight_plan::{
    format_distance, format_duration, BatteryLevel, FlightEstimate, FlightPlan, GeoPoint,
    PlanWaypoint, DEFAULT_BATTERY_ENDURANCE_MIN,
};
pub use limits::Limits;
pub use models::{
    wind_direction_to_cardinal, FlightCategory, ForecastPeriod, WeatherReport, WeatherSnapshot,
};
pub use settings::Settings;
pub use spatial::haversine_distance;
