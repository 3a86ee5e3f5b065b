//! Verdict transition alerts.
//!
//! Listens on the assessment broadcast and logs whenever a station's
//! overall verdict changes.

use tokio::sync::broadcast::{self, error::RecvError};

use droneview_core::HazardVerdict;

use crate::state::AssessmentEvent;

pub async fn run_alert_loop(
    mut events: broadcast::Receiver<AssessmentEvent>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Alert loop shutting down");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => {
                    let Some(message) = describe_transition(&event) else {
                        continue;
                    };
                    if event.assessment.overall >= HazardVerdict::Unsafe {
                        tracing::warn!(station = %event.station_id, "{}", message);
                        for warning in &event.assessment.warnings {
                            tracing::warn!(station = %event.station_id, "  {}", warning);
                        }
                    } else {
                        tracing::info!(station = %event.station_id, "{}", message);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!("Alert loop lagged, skipped {} event(s)", missed);
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

/// Human-readable transition line, or `None` when the verdict is unchanged.
pub fn describe_transition(event: &AssessmentEvent) -> Option<String> {
    if !event.verdict_changed() {
        return None;
    }
    let current = event.assessment.overall;
    Some(match event.previous {
        Some(previous) => format!(
            "{}: {} -> {} ({})",
            event.station_id, previous, current, event.assessment.overall_message
        ),
        None => format!(
            "{}: {} ({})",
            event.station_id, current, event.assessment.overall_message
        ),
    })
}
