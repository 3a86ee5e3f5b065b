//! End-to-end assessment behaviour through the public API.

use droneview_core::{
    FlightAssessment, HazardVerdict, Limits, SafetyAssessor, UnknownConditionPolicy,
    WeatherSnapshot,
};

fn nominal() -> WeatherSnapshot {
    WeatherSnapshot::new(5.0, 10.0, 20.0)
        .with_gust(5.0)
        .with_humidity(50.0)
        .with_condition("clear")
}

fn worst_dimension(assessment: &FlightAssessment) -> HazardVerdict {
    assessment
        .dimensions()
        .iter()
        .map(|(_, verdict)| *verdict)
        .max()
        .unwrap_or_default()
}

#[test]
fn test_calm_clear_day_is_safe() {
    let result = SafetyAssessor::default().assess(&nominal());

    assert_eq!(result.overall, HazardVerdict::Safe);
    for (name, verdict) in result.dimensions() {
        assert_eq!(verdict, HazardVerdict::Safe, "{name} should be safe");
    }
    assert_eq!(result.overall_message, "Conditions are SAFE for drone operations");
    assert!(result.warnings.is_empty());
    assert!(result.recommendations.is_empty());
    assert!(result.is_flyable());
}

#[test]
fn test_extreme_wind_is_no_fly() {
    let assessor = SafetyAssessor::default();
    let mut snapshot = nominal();
    snapshot.wind_speed_kt = assessor.limits().max_wind_speed_kt() * 1.6;

    let result = assessor.assess(&snapshot);

    assert_eq!(result.wind, HazardVerdict::NoFly);
    assert_eq!(result.overall, HazardVerdict::NoFly);
    assert_eq!(result.overall_message, "NO FLY - Dangerous conditions present");
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.eq_ignore_ascii_case("secure all equipment")));
    assert!(result.warnings[0].starts_with("High wind speed:"));
    assert!(!result.is_flyable());
}

#[test]
fn test_heavy_thunderstorm_is_storm_not_rain() {
    let result = SafetyAssessor::default().assess(&nominal().with_condition("heavy thunderstorm"));

    assert_eq!(result.precipitation, HazardVerdict::NoFly);
    assert_eq!(result.warnings, vec!["Thunderstorm conditions detected".to_string()]);
}

#[test]
fn test_humidity_over_limit_is_caution_with_integer_percentages() {
    let limits = Limits::default();
    let snapshot = nominal().with_humidity(limits.max_humidity + 1.0);

    let result = SafetyAssessor::new(limits).assess(&snapshot);

    assert_eq!(result.temperature, HazardVerdict::Caution);
    assert_eq!(result.overall, HazardVerdict::Caution);
    assert_eq!(result.warnings, vec!["High humidity: 96% (maximum: 95%)".to_string()]);
}

#[test]
fn test_overall_is_max_of_dimensions() {
    let assessor = SafetyAssessor::default();
    let cases = [
        nominal(),
        nominal().with_condition("light rain"),
        nominal().with_condition("snow"),
        nominal().with_gust(31.0),
        WeatherSnapshot::new(15.0, 1.5, -20.0).with_condition("mist"),
        WeatherSnapshot::new(30.0, 0.5, 45.0).with_condition("thunderstorm"),
    ];

    for snapshot in &cases {
        let result = assessor.assess(snapshot);
        assert_eq!(result.overall, worst_dimension(&result), "{snapshot:?}");
    }
}

#[test]
fn test_assess_is_deterministic_and_does_not_leak() {
    let assessor = SafetyAssessor::default();
    let stormy = WeatherSnapshot::new(40.0, 0.2, -30.0).with_condition("heavy snow");

    let first = assessor.assess(&stormy);
    let calm = assessor.assess(&nominal());
    let second = assessor.assess(&stormy);

    assert_eq!(first, second);
    assert!(calm.warnings.is_empty());
    assert!(calm.recommendations.is_empty());
}

#[test]
fn test_more_wind_never_improves_verdict() {
    let assessor = SafetyAssessor::default();
    let mut previous = HazardVerdict::Safe;

    for step in 0..=80 {
        let wind_kt = step as f64 * 0.5;
        let mut snapshot = nominal();
        snapshot.wind_speed_kt = wind_kt;
        snapshot.wind_gust_kt = wind_kt;

        let verdict = assessor.assess(&snapshot).wind;
        assert!(verdict >= previous, "wind {wind_kt} kt dropped to {verdict:?}");
        previous = verdict;
    }
    assert_eq!(previous, HazardVerdict::NoFly);
}

#[test]
fn test_less_visibility_never_improves_verdict() {
    let assessor = SafetyAssessor::default();
    let mut previous = HazardVerdict::Safe;

    for step in (0..=40).rev() {
        let visibility_mi = step as f64 * 0.25;
        let mut snapshot = nominal();
        snapshot.visibility_mi = visibility_mi;

        let verdict = assessor.assess(&snapshot).visibility;
        assert!(verdict >= previous, "visibility {visibility_mi} mi dropped to {verdict:?}");
        previous = verdict;
    }
    assert_eq!(previous, HazardVerdict::NoFly);
}

#[test]
fn test_values_at_limits_are_not_breaches() {
    let limits = Limits::default();
    let assessor = SafetyAssessor::new(limits);

    let mut snapshot = nominal().with_humidity(limits.max_humidity);
    snapshot.wind_speed_kt = limits.max_wind_speed_kt();
    snapshot.wind_gust_kt = limits.max_wind_gust_kt();
    snapshot.visibility_mi = limits.min_visibility_mi();
    snapshot.temperature_c = limits.max_temperature;

    let result = assessor.assess(&snapshot);

    // Within limits but inside the watch margins.
    assert_eq!(result.wind, HazardVerdict::Caution);
    assert_eq!(result.visibility, HazardVerdict::Caution);
    assert_eq!(result.temperature, HazardVerdict::Safe);
    assert!(result.warnings.is_empty());

    snapshot.temperature_c = limits.min_temperature;
    assert_eq!(assessor.assess(&snapshot).temperature, HazardVerdict::Safe);
}

#[test]
fn test_condition_keywords_ignore_case() {
    let assessor = SafetyAssessor::default();

    let upper = assessor.assess(&nominal().with_condition("THUNDERSTORM"));
    let lower = assessor.assess(&nominal().with_condition("thunderstorm"));
    assert_eq!(upper.precipitation, HazardVerdict::NoFly);
    assert_eq!(upper, lower);

    let rain = assessor.assess(&nominal().with_condition("Heavy Rain Showers"));
    assert_eq!(rain.precipitation, HazardVerdict::Unsafe);
}

#[test]
fn test_unknown_condition_policy() {
    let blank = nominal().with_condition("");

    let permissive = SafetyAssessor::default().assess(&blank);
    assert_eq!(permissive.precipitation, HazardVerdict::Safe);

    let cautious = SafetyAssessor::default()
        .with_unknown_condition_policy(UnknownConditionPolicy::Cautious)
        .assess(&blank);
    assert_eq!(cautious.precipitation, HazardVerdict::Caution);
    assert_eq!(
        cautious.warnings,
        vec!["Sky condition unknown - verify conditions visually".to_string()]
    );

    // Unrecognised but non-empty text stays safe under either policy.
    let overcast = SafetyAssessor::default()
        .with_unknown_condition_policy(UnknownConditionPolicy::Cautious)
        .assess(&nominal().with_condition("Overcast"));
    assert_eq!(overcast.precipitation, HazardVerdict::Safe);
}

#[test]
fn test_assessment_serializes_verdicts_as_snake_case() {
    let result = SafetyAssessor::default().assess(&nominal().with_condition("storm"));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["overall"], "no_fly");
    assert_eq!(json["wind"], "safe");
}
