//! Estimate distance, flight time and battery use for an out-and-back flight.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use droneview_cli::init_tracing;
use droneview_cli::render::render_estimate;
use droneview_core::{FlightPlan, GeoPoint, DEFAULT_BATTERY_ENDURANCE_MIN};

/// Plan a drone flight and estimate battery usage
#[derive(Parser, Debug)]
#[command(author, version, about, allow_negative_numbers = true)]
struct Args {
    /// Load a saved plan instead of building one from flags
    #[arg(long, conflicts_with_all = ["home_lat", "home_lon", "target_lat", "target_lon"])]
    plan: Option<PathBuf>,

    /// Plan name
    #[arg(long, default_value = "Flight Plan")]
    name: String,

    /// Home latitude
    #[arg(long, required_unless_present = "plan")]
    home_lat: Option<f64>,

    /// Home longitude
    #[arg(long, required_unless_present = "plan")]
    home_lon: Option<f64>,

    /// Target latitude
    #[arg(long, required_unless_present = "plan")]
    target_lat: Option<f64>,

    /// Target longitude
    #[arg(long, required_unless_present = "plan")]
    target_lon: Option<f64>,

    /// Altitude in meters
    #[arg(long, default_value_t = 50.0)]
    altitude: f64,

    /// Cruise speed in m/s
    #[arg(long, default_value_t = 10.0)]
    speed: f64,

    /// Planned start (RFC 3339), defaults to now
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Drone model
    #[arg(long, default_value = "")]
    drone_type: String,

    /// Flight purpose
    #[arg(long, default_value = "")]
    purpose: String,

    /// Battery endurance in minutes
    #[arg(long, default_value_t = DEFAULT_BATTERY_ENDURANCE_MIN)]
    endurance: f64,

    /// Save the plan as JSON
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the estimate as JSON
    #[arg(long)]
    json: bool,
}

fn build_plan(args: &Args) -> Result<FlightPlan> {
    if let Some(path) = &args.plan {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("Invalid flight plan in {}", path.display()));
    }

    let (Some(home_lat), Some(home_lon), Some(target_lat), Some(target_lon)) =
        (args.home_lat, args.home_lon, args.target_lat, args.target_lon)
    else {
        anyhow::bail!("Home and target coordinates are required");
    };

    Ok(FlightPlan {
        name: args.name.clone(),
        description: String::new(),
        home: GeoPoint::new(home_lat, home_lon),
        target: GeoPoint::new(target_lat, target_lon),
        altitude_m: args.altitude,
        speed_mps: args.speed,
        planned_start: args.start.unwrap_or_else(Utc::now),
        drone_type: args.drone_type.clone(),
        purpose: args.purpose.clone(),
        waypoints: Vec::new(),
    })
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let plan = build_plan(&args)?;
    let estimate = plan.estimate(args.endurance)?;

    if let Some(path) = &args.save {
        std::fs::write(path, serde_json::to_string_pretty(&plan)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Saved plan to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", render_estimate(&plan, &estimate));
    }
    Ok(())
}
