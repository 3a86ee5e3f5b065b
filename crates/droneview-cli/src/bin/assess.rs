//! Assess a weather snapshot against the configured flight limits.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use droneview_cli::render::{render_assessment, render_limits};
use droneview_cli::{init_tracing, load_settings};
use droneview_core::{UnknownConditionPolicy, WeatherSnapshot};

/// Assess flight conditions for a weather snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, allow_negative_numbers = true)]
struct Args {
    /// Sustained wind in knots
    #[arg(long, default_value_t = 0.0)]
    wind: f64,

    /// Gust speed in knots
    #[arg(long, default_value_t = 0.0)]
    gust: f64,

    /// Visibility in statute miles
    #[arg(long, default_value_t = 10.0)]
    visibility: f64,

    /// Temperature in °C
    #[arg(long, default_value_t = 15.0)]
    temperature: f64,

    /// Relative humidity in percent
    #[arg(long, default_value_t = 50.0)]
    humidity: f64,

    /// Sky condition text, e.g. "light rain"
    #[arg(long, default_value = "")]
    condition: String,

    /// Read the snapshot from a JSON file instead of flags
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Settings file holding the flight limits
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Treat a blank condition as a caution
    #[arg(long)]
    cautious: bool,

    /// Print the assessment as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let (_, settings) = load_settings(args.settings.as_deref())?;
    let mut assessor = settings.assessor();
    if args.cautious {
        assessor.set_unknown_condition_policy(UnknownConditionPolicy::Cautious);
    }

    let snapshot = match &args.snapshot {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<WeatherSnapshot>(&raw)
                .with_context(|| format!("Invalid snapshot in {}", path.display()))?
        }
        None => WeatherSnapshot::new(args.wind, args.visibility, args.temperature)
            .with_gust(args.gust)
            .with_humidity(args.humidity)
            .with_condition(args.condition.clone()),
    };

    let assessment = assessor.assess(&snapshot);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
    } else {
        println!("{}", render_limits(assessor.limits()));
        println!();
        print!("{}", render_assessment(&assessment));
    }
    Ok(())
}
