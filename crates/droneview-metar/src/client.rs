//! Aviation Weather HTTP client.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use droneview_core::{nearest_airport, normalize_icao, WeatherReport};

use crate::error::{MetarError, Result};
use crate::metar::{MetarRecord, StationRecord, TafRecord};

pub const DEFAULT_BASE_URL: &str = "https://aviationweather.gov/api/data";
const USER_AGENT: &str = "DroneView/1.0 (contact@droneview.app)";
/// Half-width of the bounding box used for coordinate lookups, in degrees.
const LOOKUP_RADIUS_DEG: f64 = 1.0;
const METAR_HOURS: &str = "2";

/// HTTP client for the Aviation Weather data API.
#[derive(Debug, Clone)]
pub struct AviationWeatherClient {
    client: Client,
    base_url: String,
}

impl AviationWeatherClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(MetarError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Most recent METAR for a station.
    pub async fn fetch_metar(&self, station: &str) -> Result<MetarRecord> {
        let records: Vec<MetarRecord> = self
            .get_json(
                "metar",
                &[("ids", station), ("format", "json"), ("hours", METAR_HOURS)],
            )
            .await?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| MetarError::NoData(station.to_string()))
    }

    /// Current TAF for a station, if one is issued.
    pub async fn fetch_taf(&self, station: &str) -> Result<Option<TafRecord>> {
        let records: Vec<TafRecord> = self
            .get_json("taf", &[("ids", station), ("format", "json")])
            .await?;
        Ok(records.into_iter().next())
    }

    /// First reporting station inside a box around the coordinates.
    pub async fn lookup_station(&self, lat: f64, lon: f64) -> Result<String> {
        let bbox = format!(
            "{:.4},{:.4},{:.4},{:.4}",
            lat - LOOKUP_RADIUS_DEG,
            lon - LOOKUP_RADIUS_DEG,
            lat + LOOKUP_RADIUS_DEG,
            lon + LOOKUP_RADIUS_DEG
        );
        let stations: Vec<StationRecord> = self
            .get_json(
                "metar",
                &[("format", "json"), ("hours", METAR_HOURS), ("bbox", bbox.as_str())],
            )
            .await?;

        stations
            .into_iter()
            .map(|station| station.icao_id)
            .find(|id| !id.is_empty())
            .ok_or(MetarError::NoStation { lat, lon })
    }

    /// METAR plus forecast for a station. A failed TAF fetch only drops the forecast.
    pub async fn fetch_report(&self, station: &str) -> Result<WeatherReport> {
        let (metar, taf) = tokio::join!(self.fetch_metar(station), self.fetch_taf(station));

        let mut report = metar?.into_report();
        match taf {
            Ok(Some(taf)) => taf.apply_to(&mut report),
            Ok(None) => tracing::debug!("No TAF issued for {}", station),
            Err(err) => tracing::warn!("TAF fetch for {} failed: {}", station, err),
        }

        tracing::info!(
            station = %report.station_id,
            wind_kt = report.wind_speed_kt,
            visibility_mi = report.visibility_mi,
            "Fetched weather report"
        );
        Ok(report)
    }

    /// Pick a station: the preferred airport if it is a valid code, else the
    /// nearest major airport to the coordinates.
    pub fn resolve_station(preferred: Option<&str>, lat: f64, lon: f64) -> String {
        if let Some(code) = preferred.and_then(|code| normalize_icao(code).ok()) {
            return code;
        }
        nearest_airport(lat, lon).icao.to_string()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| MetarError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        // The API answers 204 when a station has nothing to report.
        if status == reqwest::StatusCode::NO_CONTENT {
            return decode(endpoint, "[]");
        }
        if !status.is_success() {
            return Err(MetarError::Status { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| MetarError::Request { url, source })?;
        decode(endpoint, &body)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T> {
    let body = if body.trim().is_empty() { "[]" } else { body };
    serde_json::from_str(body).map_err(|source| MetarError::InvalidJson { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_station_prefers_valid_code() {
        assert_eq!(
            AviationWeatherClient::resolve_station(Some(" ksea "), 0.0, 0.0),
            "KSEA"
        );
    }

    #[test]
    fn test_resolve_station_falls_back_to_nearest() {
        // Downtown Denver
        assert_eq!(
            AviationWeatherClient::resolve_station(None, 39.7392, -104.9903),
            "KDEN"
        );
        assert_eq!(
            AviationWeatherClient::resolve_station(Some("not a code"), 40.7128, -74.0060),
            "KJFK"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = AviationWeatherClient::new("https://example.test/api/").unwrap();
        assert_eq!(client.base_url(), "https://example.test/api");
    }

    #[test]
    fn test_empty_body_decodes_as_no_records() {
        let records: Vec<MetarRecord> = decode("metar", "  ").unwrap();
        assert!(records.is_empty());
        assert!(matches!(
            decode::<Vec<MetarRecord>>("metar", "<html>"),
            Err(MetarError::InvalidJson { endpoint: "metar", .. })
        ));
    }
}
