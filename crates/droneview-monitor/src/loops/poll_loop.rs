//! Weather polling loop.
//!
//! Periodically fetches METAR/TAF for the watched stations and feeds the
//! reports through the assessor.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval, MissedTickBehavior};

use droneview_core::{nearest_airport, Settings};
use droneview_metar::AviationWeatherClient;

use crate::config::Config;
use crate::state::AppState;

/// Start the polling loop. Runs until a shutdown signal arrives.
pub async fn run_poll_loop(
    state: Arc<AppState>,
    config: Config,
    settings: Settings,
    mut shutdown: broadcast::Receiver<()>,
) {
    let client = match AviationWeatherClient::new(&config.api_url) {
        Ok(client) => client,
        Err(err) => {
            tracing::error!("Poll loop disabled: {}", err);
            return;
        }
    };

    let stations = resolve_stations(&client, &config, &settings).await;
    tracing::info!(
        "Watching {} every {}s",
        stations.join(", "),
        config.poll_interval_secs
    );

    let mut ticker = interval(Duration::from_secs(config.poll_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Poll loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                if let Some(path) = config.settings_path.as_deref() {
                    if let Err(err) = refresh_settings(&state, path) {
                        tracing::warn!("{:#}", err);
                    }
                }

                for station in &stations {
                    if let Err(err) = poll_station(&state, &client, station).await {
                        tracing::warn!("{:#}", err);
                    }
                }
            }
        }
    }
}

/// Fetch one station and ingest the report.
pub async fn poll_station(
    state: &AppState,
    client: &AviationWeatherClient,
    station: &str,
) -> Result<()> {
    let report = client
        .fetch_report(station)
        .await
        .with_context(|| format!("Failed to fetch weather for {}", station))?;

    let assessment = state.ingest(report);
    tracing::debug!(
        station,
        verdict = %assessment.overall,
        warnings = assessment.warnings.len(),
        "Station assessed"
    );
    Ok(())
}

/// Reload the settings file and apply its limits and unknown-condition policy
/// if either changed. Returns whether anything was applied.
pub fn refresh_settings(state: &AppState, path: &Path) -> Result<bool> {
    let settings = Settings::load(path)
        .with_context(|| format!("Failed to reload settings from {}", path.display()))?;

    let mut changed = false;
    if settings.limits != state.limits() {
        state
            .set_limits(settings.limits)
            .context("Rejected limits from settings file")?;
        changed = true;
    }
    if settings.unknown_conditions != state.unknown_condition_policy() {
        state.set_unknown_condition_policy(settings.unknown_conditions);
        changed = true;
    }
    Ok(changed)
}

/// Explicit stations win, then a lookup around the configured coordinates,
/// then the airport selected in settings.
async fn resolve_stations(
    client: &AviationWeatherClient,
    config: &Config,
    settings: &Settings,
) -> Vec<String> {
    if !config.stations.is_empty() {
        return config.stations.clone();
    }

    if let Some((lat, lon)) = config.coordinates() {
        return match client.lookup_station(lat, lon).await {
            Ok(station) => vec![station],
            Err(err) => {
                let fallback = nearest_airport(lat, lon);
                tracing::warn!("Station lookup failed ({}), using {}", err, fallback.icao);
                vec![fallback.icao.to_string()]
            }
        };
    }

    vec![settings.selected_airport().to_string()]
}
