//! Live Aviation Weather API tests.
//!
//! Run with: cargo test -p droneview-metar --test live_test -- --ignored
//! Requires network access.

use droneview_core::SafetyAssessor;
use droneview_metar::{AviationWeatherClient, DEFAULT_BASE_URL};

fn base_url() -> String {
    std::env::var("DRONEVIEW_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[tokio::test]
#[ignore]
async fn test_fetch_and_assess_kdfw() {
    let client = AviationWeatherClient::new(base_url()).unwrap();

    let report = client.fetch_report("KDFW").await.unwrap();
    assert_eq!(report.station_id, "KDFW");
    assert!(!report.raw_metar.is_empty());
    assert!(report.forecast.len() <= 24);

    let assessment = SafetyAssessor::default().assess(&report.snapshot());
    println!("KDFW: {} - {}", assessment.overall, assessment.overall_message);
}

#[tokio::test]
#[ignore]
async fn test_lookup_station_near_seattle() {
    let client = AviationWeatherClient::new(base_url()).unwrap();

    let station = client.lookup_station(47.6062, -122.3321).await.unwrap();
    assert!(!station.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_unknown_station_has_no_data() {
    let client = AviationWeatherClient::new(base_url()).unwrap();

    let result = client.fetch_metar("ZZZZ").await;
    assert!(matches!(result, Err(droneview_metar::MetarError::NoData(_))));
}
