//! Terminal formatting for assessments, reports and flight estimates.

use std::fmt::Write;

use droneview_core::units::celsius_to_fahrenheit;
use droneview_core::{
    format_distance, format_duration, BatteryLevel, FlightAssessment, FlightEstimate, FlightPlan,
    HazardVerdict, Limits, WeatherReport,
};

/// Forecast rows shown under a report.
const FORECAST_ROWS: usize = 6;

fn verdict_tag(verdict: HazardVerdict) -> String {
    format!("[{}]", verdict.label())
}

pub fn render_assessment(assessment: &FlightAssessment) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        verdict_tag(assessment.overall),
        assessment.overall_message
    );
    out.push('\n');

    for (name, verdict) in assessment.dimensions() {
        let _ = writeln!(out, "  {:<14} {}", name, verdict.label());
    }

    if !assessment.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &assessment.warnings {
            let _ = writeln!(out, "  ! {}", warning);
        }
    }

    if !assessment.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for recommendation in &assessment.recommendations {
            let _ = writeln!(out, "  - {}", recommendation);
        }
    }
    out
}

pub fn render_limits(limits: &Limits) -> String {
    format!(
        "Limits: wind {:.1} kts, gusts {:.1} kts, visibility {:.1} mi, temp {:.0}..{:.0} °C, humidity {:.0}%",
        limits.max_wind_speed_kt(),
        limits.max_wind_gust_kt(),
        limits.min_visibility_mi(),
        limits.min_temperature,
        limits.max_temperature,
        limits.max_humidity
    )
}

pub fn render_report(report: &WeatherReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        report.location.as_deref().unwrap_or(&report.station_id)
    );
    if let Some(observed) = report.observed_at {
        let _ = writeln!(out, "  Observed     {}", observed.format("%Y-%m-%d %H:%M UTC"));
    }
    let _ = writeln!(
        out,
        "  Temperature  {:.1} °C ({:.1} °F)",
        report.temperature_c,
        celsius_to_fahrenheit(report.temperature_c)
    );
    let _ = writeln!(out, "  Humidity     {:.0}%", report.humidity_pct);
    let _ = writeln!(out, "  Wind         {}", report.format_wind());
    let _ = writeln!(out, "  Visibility   {:.1} mi", report.visibility_mi);
    if let Some(pressure) = report.pressure_hpa {
        let _ = writeln!(out, "  Pressure     {:.1} hPa", pressure);
    }
    if let Some(category) = &report.flight_category {
        let _ = writeln!(
            out,
            "  Category     {} ({})",
            category.code(),
            category.condition_text()
        );
    }
    let _ = writeln!(out, "  Sky          {}", report.sky_cover);
    if let Some(ceiling) = report.ceiling_ft {
        let _ = writeln!(out, "  Ceiling      {:.0} ft", ceiling);
    }

    if !report.raw_metar.is_empty() {
        let _ = writeln!(out, "\nMETAR  {}", report.raw_metar);
    }
    if let Some(taf) = &report.raw_taf {
        let _ = writeln!(out, "TAF    {}", taf);
    }

    if !report.forecast.is_empty() {
        out.push_str("\nForecast:\n");
        for period in report.forecast.iter().take(FORECAST_ROWS) {
            let time = period
                .time
                .map(|t| t.format("%d %H:%MZ").to_string())
                .unwrap_or_else(|| "--".to_string());
            let temperature = period
                .temperature_c
                .map(|t| format!("{:.0} °C", t))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {:<10} {:>3.0} kts  {:<8} {}",
                time, period.wind_speed_kt, temperature, period.condition
            );
        }
    }
    out
}

pub fn render_estimate(plan: &FlightPlan, estimate: &FlightEstimate) -> String {
    let battery_note = match estimate.battery_level {
        BatteryLevel::Nominal => "",
        BatteryLevel::Elevated => " (elevated)",
        BatteryLevel::Critical => " (CRITICAL - plan exceeds safe reserve)",
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.name);
    if !plan.description.is_empty() {
        let _ = writeln!(out, "  {}", plan.description);
    }
    let _ = writeln!(
        out,
        "  Start        {}",
        plan.planned_start.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "  Altitude     {:.0} m, cruise {:.1} m/s",
        plan.altitude_m, plan.speed_mps
    );
    let _ = writeln!(out, "  Distance     {}", format_distance(estimate.distance_m));
    let _ = writeln!(
        out,
        "  Flight time  {} (round trip)",
        format_duration(estimate.round_trip_secs)
    );
    let _ = writeln!(
        out,
        "  Battery      {}%{}",
        estimate.battery_usage_pct, battery_note
    );
    if !plan.waypoints.is_empty() {
        let _ = writeln!(out, "  Waypoints    {}", plan.waypoints.len());
    }
    out
}
