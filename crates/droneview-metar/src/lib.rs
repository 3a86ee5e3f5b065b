//! METAR/TAF retrieval from the Aviation Weather data API.

pub mod client;
pub mod error;
pub mod metar;

pub use client::{AviationWeatherClient, DEFAULT_BASE_URL};
pub use error::MetarError;
pub use metar::{describe_present_weather, MetarRecord, TafRecord};
