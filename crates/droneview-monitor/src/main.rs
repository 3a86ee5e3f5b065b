//! DroneView monitor - polls aviation weather and tracks flight safety verdicts.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use droneview_core::Settings;
use droneview_monitor::config::Config;
use droneview_monitor::loops::{alert_loop, poll_loop};
use droneview_monitor::state::AppState;

fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("droneview_monitor=debug".parse()?))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize tracing
    if config.log_json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json())
            .with(env_filter()?)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(env_filter()?)
            .init();
    }

    tracing::info!("Starting DroneView monitor...");

    let settings = match config.settings_path.as_deref() {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let state = Arc::new(AppState::new(settings.assessor(), config.feed_capacity));
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    // Start background loops
    let alerts = tokio::spawn(alert_loop::run_alert_loop(
        state.subscribe(),
        shutdown_tx.subscribe(),
    ));
    let poller = tokio::spawn(poll_loop::run_poll_loop(
        state.clone(),
        config,
        settings,
        shutdown_tx.subscribe(),
    ));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    tracing::info!("Shutdown requested");

    let _ = shutdown_tx.send(());
    let (poll_result, alert_result) = tokio::join!(poller, alerts);
    poll_result.context("Poll loop panicked")?;
    alert_result.context("Alert loop panicked")?;

    for status in state.get_all_stations() {
        tracing::info!(
            "Last verdict for {}: {}",
            status.station_id,
            status.assessment.overall
        );
    }
    Ok(())
}
