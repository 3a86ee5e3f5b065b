//! Flight-condition safety assessment.
//!
//! Evaluates a weather snapshot against operator limits along four
//! independent hazard dimensions (wind, visibility, precipitation,
//! temperature) and reduces them to a single verdict.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::limits::Limits;
use crate::models::WeatherSnapshot;
use crate::units::celsius_to_fahrenheit;

/// Sustained wind above this multiple of the limit is a no-fly condition.
const WIND_NO_FLY_FACTOR: f64 = 1.5;
/// Gusts above this multiple of the gust limit are unsafe rather than cautionary.
const GUST_UNSAFE_FACTOR: f64 = 1.3;
/// Sustained wind above this fraction of the limit warrants monitoring.
const WIND_WATCH_FACTOR: f64 = 0.7;
/// Visibility below this fraction of the minimum is a no-fly condition.
const VISIBILITY_NO_FLY_FACTOR: f64 = 0.5;
/// Visibility below this multiple of the minimum warrants closer contact.
const VISIBILITY_WATCH_FACTOR: f64 = 1.5;

/// Hazard verdict, ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HazardVerdict {
    #[default]
    Safe,
    Caution,
    Unsafe,
    NoFly,
}

impl HazardVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            HazardVerdict::Safe => "SAFE",
            HazardVerdict::Caution => "CAUTION",
            HazardVerdict::Unsafe => "UNSAFE",
            HazardVerdict::NoFly => "NO FLY",
        }
    }

    /// Display color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            HazardVerdict::Safe => "#00ff00",
            HazardVerdict::Caution => "#ffaa00",
            HazardVerdict::Unsafe => "#ff6600",
            HazardVerdict::NoFly => "#ff0000",
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            HazardVerdict::Safe => "Conditions are SAFE for drone operations",
            HazardVerdict::Caution => "CAUTION advised - monitor conditions closely",
            HazardVerdict::Unsafe => "Conditions are UNSAFE - flight not recommended",
            HazardVerdict::NoFly => "NO FLY - Dangerous conditions present",
        }
    }

    fn recommendations(&self) -> &'static [&'static str] {
        match self {
            HazardVerdict::Safe => &[],
            HazardVerdict::Caution => &[
                "Consider postponing non-essential flights",
                "Maintain visual line of sight at all times",
            ],
            HazardVerdict::Unsafe => &[
                "Wait for improved weather conditions",
                "Monitor weather updates frequently",
            ],
            HazardVerdict::NoFly => &["Do not attempt flight operations", "Secure all equipment"],
        }
    }
}

impl fmt::Display for HazardVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How to score a condition string that is blank.
///
/// Non-blank text that matches no hazard keyword is always scored safe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownConditionPolicy {
    /// Blank condition text is safe.
    #[default]
    Permissive,
    /// Blank condition text is a caution with a warning.
    Cautious,
}

/// Result of one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightAssessment {
    pub overall: HazardVerdict,
    pub wind: HazardVerdict,
    pub visibility: HazardVerdict,
    pub precipitation: HazardVerdict,
    pub temperature: HazardVerdict,
    pub overall_message: String,
    /// One entry per triggered hazard, in evaluation order
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl FlightAssessment {
    /// Verdicts per dimension, in evaluation order.
    pub fn dimensions(&self) -> [(&'static str, HazardVerdict); 4] {
        [
            ("wind", self.wind),
            ("visibility", self.visibility),
            ("precipitation", self.precipitation),
            ("temperature", self.temperature),
        ]
    }

    pub fn is_flyable(&self) -> bool {
        self.overall <= HazardVerdict::Caution
    }
}

#[derive(Debug, Default)]
struct Findings {
    warnings: Vec<String>,
    recommendations: Vec<String>,
}

impl Findings {
    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn recommend(&mut self, message: impl Into<String>) {
        self.recommendations.push(message.into());
    }
}

/// Stateless evaluator over the currently configured limits.
#[derive(Debug, Clone, Default)]
pub struct SafetyAssessor {
    limits: Limits,
    unknown_conditions: UnknownConditionPolicy,
}

impl SafetyAssessor {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            unknown_conditions: UnknownConditionPolicy::default(),
        }
    }

    pub fn with_unknown_condition_policy(mut self, policy: UnknownConditionPolicy) -> Self {
        self.unknown_conditions = policy;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Replace the limits used by subsequent assessments.
    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    pub fn unknown_condition_policy(&self) -> UnknownConditionPolicy {
        self.unknown_conditions
    }

    pub fn set_unknown_condition_policy(&mut self, policy: UnknownConditionPolicy) {
        self.unknown_conditions = policy;
    }

    /// Assess a snapshot. Every call builds a fresh result.
    pub fn assess(&self, snapshot: &WeatherSnapshot) -> FlightAssessment {
        let mut findings = Findings::default();

        let wind = evaluate_wind(snapshot, &self.limits, &mut findings);
        let visibility = evaluate_visibility(snapshot, &self.limits, &mut findings);
        let precipitation =
            evaluate_precipitation(&snapshot.condition, self.unknown_conditions, &mut findings);
        let temperature = evaluate_temperature(snapshot, &self.limits, &mut findings);

        let overall = wind.max(visibility).max(precipitation).max(temperature);
        for recommendation in overall.recommendations() {
            findings.recommend(*recommendation);
        }

        tracing::debug!(
            ?overall,
            ?wind,
            ?visibility,
            ?precipitation,
            ?temperature,
            warnings = findings.warnings.len(),
            "Assessed flight conditions"
        );

        FlightAssessment {
            overall,
            wind,
            visibility,
            precipitation,
            temperature,
            overall_message: overall.summary().to_string(),
            warnings: findings.warnings,
            recommendations: findings.recommendations,
        }
    }
}

fn evaluate_wind(
    snapshot: &WeatherSnapshot,
    limits: &Limits,
    findings: &mut Findings,
) -> HazardVerdict {
    let max_speed_kt = limits.max_wind_speed_kt();
    let max_gust_kt = limits.max_wind_gust_kt();

    // Sustained breach takes priority; gusts are not checked after it.
    if snapshot.wind_speed_kt > max_speed_kt {
        findings.warn(format!(
            "High wind speed: {:.1} kts (limit: {:.1} kts)",
            rounded(snapshot.wind_speed_kt, 1),
            rounded(max_speed_kt, 1)
        ));
        return if snapshot.wind_speed_kt > max_speed_kt * WIND_NO_FLY_FACTOR {
            HazardVerdict::NoFly
        } else {
            HazardVerdict::Unsafe
        };
    }

    if snapshot.wind_gust_kt > max_gust_kt {
        findings.warn(format!(
            "High wind gusts: {:.1} kts (limit: {:.1} kts)",
            rounded(snapshot.wind_gust_kt, 1),
            rounded(max_gust_kt, 1)
        ));
        return if snapshot.wind_gust_kt > max_gust_kt * GUST_UNSAFE_FACTOR {
            HazardVerdict::Unsafe
        } else {
            HazardVerdict::Caution
        };
    }

    if snapshot.wind_speed_kt > max_speed_kt * WIND_WATCH_FACTOR {
        findings.recommend("Monitor wind conditions closely");
        return HazardVerdict::Caution;
    }

    HazardVerdict::Safe
}

fn evaluate_visibility(
    snapshot: &WeatherSnapshot,
    limits: &Limits,
    findings: &mut Findings,
) -> HazardVerdict {
    let min_visibility_mi = limits.min_visibility_mi();

    if snapshot.visibility_mi < min_visibility_mi {
        findings.warn(format!(
            "Low visibility: {:.1} mi (minimum: {:.1} mi)",
            rounded(snapshot.visibility_mi, 1),
            rounded(min_visibility_mi, 1)
        ));
        return if snapshot.visibility_mi < min_visibility_mi * VISIBILITY_NO_FLY_FACTOR {
            HazardVerdict::NoFly
        } else {
            HazardVerdict::Unsafe
        };
    }

    if snapshot.visibility_mi < min_visibility_mi * VISIBILITY_WATCH_FACTOR {
        findings.recommend("Reduced visibility - maintain closer visual contact");
        return HazardVerdict::Caution;
    }

    HazardVerdict::Safe
}

fn evaluate_precipitation(
    condition: &str,
    policy: UnknownConditionPolicy,
    findings: &mut Findings,
) -> HazardVerdict {
    let condition = condition.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| condition.contains(keyword));

    // First matching category wins.
    if mentions(&["thunderstorm", "storm"]) {
        findings.warn("Thunderstorm conditions detected");
        return HazardVerdict::NoFly;
    }

    if mentions(&["rain", "drizzle"]) {
        if condition.contains("heavy") {
            findings.warn("Heavy precipitation detected");
            return HazardVerdict::Unsafe;
        }
        findings.warn("Precipitation detected");
        return HazardVerdict::Caution;
    }

    if mentions(&["snow", "sleet"]) {
        findings.warn("Snow/sleet conditions detected");
        return HazardVerdict::Unsafe;
    }

    if mentions(&["fog", "mist"]) {
        findings.warn("Reduced visibility due to fog/mist");
        return HazardVerdict::Caution;
    }

    if condition.trim().is_empty() && policy == UnknownConditionPolicy::Cautious {
        findings.warn("Sky condition unknown - verify conditions visually");
        return HazardVerdict::Caution;
    }

    HazardVerdict::Safe
}

fn evaluate_temperature(
    snapshot: &WeatherSnapshot,
    limits: &Limits,
    findings: &mut Findings,
) -> HazardVerdict {
    let temperature_f = celsius_to_fahrenheit(snapshot.temperature_c);

    if snapshot.temperature_c < limits.min_temperature {
        findings.warn(format!(
            "Temperature too low: {:.1}°F (minimum: {:.1}°F)",
            rounded(temperature_f, 1),
            rounded(celsius_to_fahrenheit(limits.min_temperature), 1)
        ));
        return HazardVerdict::Unsafe;
    }

    if snapshot.temperature_c > limits.max_temperature {
        findings.warn(format!(
            "Temperature too high: {:.1}°F (maximum: {:.1}°F)",
            rounded(temperature_f, 1),
            rounded(celsius_to_fahrenheit(limits.max_temperature), 1)
        ));
        return HazardVerdict::Unsafe;
    }

    // Humidity only matters once temperature is within bounds.
    if snapshot.humidity_pct > limits.max_humidity {
        findings.warn(format!(
            "High humidity: {:.0}% (maximum: {:.0}%)",
            rounded(snapshot.humidity_pct, 0),
            rounded(limits.max_humidity, 0)
        ));
        return HazardVerdict::Caution;
    }

    HazardVerdict::Safe
}

/// Round to `decimals` places with ties away from zero before display.
/// `{:.N}` alone rounds exact ties to even (96.5 would print as 96).
fn rounded(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
