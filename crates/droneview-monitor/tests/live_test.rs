//! Live polling tests.
//!
//! Run with: cargo test -p droneview-monitor --test live_test -- --ignored
//! Requires network access.

use droneview_metar::{AviationWeatherClient, DEFAULT_BASE_URL};
use droneview_monitor::loops::poll_loop::poll_station;
use droneview_monitor::state::AppState;
use droneview_core::SafetyAssessor;

#[tokio::test]
#[ignore]
async fn test_poll_station_ingests_live_report() {
    let url = std::env::var("DRONEVIEW_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = AviationWeatherClient::new(url).unwrap();
    let state = AppState::new(SafetyAssessor::default(), 8);
    let mut events = state.subscribe();

    poll_station(&state, &client, "KDFW").await.unwrap();

    let status = state.get_station("KDFW").unwrap();
    assert!(!status.report.raw_metar.is_empty());
    let event = events.try_recv().unwrap();
    assert_eq!(event.station_id, "KDFW");
}
