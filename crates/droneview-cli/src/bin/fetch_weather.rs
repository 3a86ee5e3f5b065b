//! Fetch live aviation weather for a station and assess it.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use droneview_cli::render::{render_assessment, render_report};
use droneview_cli::{init_tracing, load_settings};
use droneview_core::{nearest_airport, normalize_icao, FlightAssessment, WeatherReport};
use droneview_metar::{AviationWeatherClient, DEFAULT_BASE_URL};

/// Fetch METAR/TAF and assess flight conditions
#[derive(Parser, Debug)]
#[command(author, version, about, allow_negative_numbers = true)]
struct Args {
    /// Aviation Weather API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// ICAO station code (defaults to the selected airport)
    #[arg(long)]
    station: Option<String>,

    /// Latitude for a nearby-station lookup
    #[arg(long, requires = "lon")]
    lat: Option<f64>,

    /// Longitude for a nearby-station lookup
    #[arg(long, requires = "lat")]
    lon: Option<f64>,

    /// Settings file holding the selected airport and limits
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print report and assessment as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    report: &'a WeatherReport,
    assessment: &'a FlightAssessment,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let (_, settings) = load_settings(args.settings.as_deref())?;
    let client = AviationWeatherClient::new(&args.url)?;

    let station = match (&args.station, args.lat.zip(args.lon)) {
        (Some(code), _) => normalize_icao(code)?,
        (None, Some((lat, lon))) => match client.lookup_station(lat, lon).await {
            Ok(station) => station,
            Err(err) => {
                let fallback = nearest_airport(lat, lon);
                eprintln!("Station lookup failed ({}), using {}", err, fallback.label());
                fallback.icao.to_string()
            }
        },
        (None, None) => settings.selected_airport().to_string(),
    };

    let report = client
        .fetch_report(&station)
        .await
        .with_context(|| format!("Failed to fetch weather for {}", station))?;
    let assessment = settings.assessor().assess(&report.snapshot());

    if args.json {
        let output = Output {
            report: &report,
            assessment: &assessment,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_report(&report));
        println!();
        print!("{}", render_assessment(&assessment));
    }
    Ok(())
}
