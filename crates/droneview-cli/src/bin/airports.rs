//! Manage the selected airport and airport presets.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use droneview_cli::{init_tracing, load_settings};
use droneview_core::{find_airport, AirportPreset, MAJOR_AIRPORTS};

/// Manage DroneView airport selection and presets
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List major airports and saved presets
    List,
    /// Save a preset
    Add {
        name: String,
        icao: String,
        #[arg(default_value = "")]
        description: String,
    },
    /// Delete a preset
    Remove { icao: String },
    /// Select the airport used for weather
    Select { icao: String },
    /// Show the selected airport
    Current,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let (path, mut settings) = load_settings(args.settings.as_deref())?;

    match args.command {
        Command::List => {
            let current = settings.selected_airport().to_string();
            println!("Major airports:");
            for airport in MAJOR_AIRPORTS {
                let marker = if airport.icao == current { '*' } else { ' ' };
                println!(" {} {}", marker, airport.label());
            }
            if settings.use_presets && !settings.presets.is_empty() {
                println!("\nPresets:");
                for preset in settings.presets.iter() {
                    let marker = if preset.icao_code == current { '*' } else { ' ' };
                    println!(" {} {}", marker, preset.display_label());
                }
            }
            return Ok(());
        }
        Command::Current => {
            let current = settings.selected_airport();
            match find_airport(current) {
                Some(airport) => println!("{}", airport.label()),
                None => match settings.presets.find(current) {
                    Some(preset) => println!("{}", preset.display_label()),
                    None => println!("{}", current),
                },
            }
            return Ok(());
        }
        Command::Add {
            name,
            icao,
            description,
        } => {
            let preset = AirportPreset::new(name, &icao, description)?;
            let label = preset.display_label();
            settings.presets.add(preset)?;
            println!("Added {}", label);
        }
        Command::Remove { icao } => match settings.presets.remove(&icao) {
            Some(preset) => println!("Removed {}", preset.display_label()),
            None => anyhow::bail!("No preset for {}", icao),
        },
        Command::Select { icao } => {
            settings.set_current_airport(&icao)?;
            println!("Selected {}", settings.selected_airport());
        }
    }

    settings
        .save(&path)
        .with_context(|| format!("Failed to save settings to {}", path.display()))?;
    Ok(())
}
