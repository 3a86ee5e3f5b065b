//! Unit conversions shared by the assessor and the display helpers.
//!
//! Limits are stored in SI units while upstream observations arrive in
//! aviation units (knots, statute miles), so conversions happen at the
//! comparison site rather than on ingest.

pub const KNOTS_PER_MPS: f64 = 1.94384;
pub const KM_PER_STATUTE_MILE: f64 = 1.60934;
pub const FEET_PER_METER: f64 = 3.28084;
pub const MPH_PER_MPS: f64 = 2.23694;
pub const HPA_PER_INHG: f64 = 33.8639;
pub const METERS_PER_STATUTE_MILE: f64 = 1609.34;

pub fn mps_to_knots(mps: f64) -> f64 {
    mps * KNOTS_PER_MPS
}

pub fn km_to_statute_miles(km: f64) -> f64 {
    km / KM_PER_STATUTE_MILE
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    (celsius * 9.0 / 5.0) + 32.0
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

pub fn mps_to_mph(mps: f64) -> f64 {
    mps * MPH_PER_MPS
}

pub fn mph_to_mps(mph: f64) -> f64 {
    mph / MPH_PER_MPS
}

pub fn inhg_to_hpa(inhg: f64) -> f64 {
    inhg * HPA_PER_INHG
}

/// Relative humidity (percent) from air temperature and dewpoint, Magnus form.
pub fn relative_humidity(temp_c: f64, dewpoint_c: f64) -> f64 {
    let gamma = |t: f64| (17.625 * t) / (243.04 + t);
    100.0 * (gamma(dewpoint_c) - gamma(temp_c)).exp()
}
