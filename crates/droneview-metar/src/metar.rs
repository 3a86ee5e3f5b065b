//! Aviation Weather JSON records and their conversion to [`WeatherReport`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use droneview_core::models::MAX_FORECAST_PERIODS;
use droneview_core::units::{inhg_to_hpa, relative_humidity, HPA_PER_INHG};
use droneview_core::{FlightCategory, ForecastPeriod, WeatherReport};

/// Altimeter settings above this are already in hPa.
const HPA_ALTIMETER_THRESHOLD: f64 = 100.0;

/// A field the API sends either as a number or as text ("10+", "VRB").
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    /// Numeric value, with a trailing `+` ignored. `None` for non-numeric text.
    pub fn value(&self) -> Option<f64> {
        match self {
            NumberOrText::Number(value) => Some(*value),
            NumberOrText::Text(text) => text.trim().trim_end_matches('+').parse().ok(),
        }
    }
}

/// Timestamp as unix seconds or an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ApiTime {
    Unix(i64),
    Text(String),
}

impl ApiTime {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            ApiTime::Unix(secs) => DateTime::from_timestamp(*secs, 0),
            ApiTime::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .ok()
                .map(|time| time.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CloudLayer {
    pub cover: String,
    pub base: Option<f64>,
}

/// Layer list, or a single summary code such as "BKN".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoverField {
    Layers(Vec<CloudLayer>),
    Code(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetarRecord {
    #[serde(default)]
    pub icao_id: String,
    #[serde(default)]
    pub raw_ob: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub obs_time: Option<ApiTime>,
    pub temp: Option<f64>,
    pub dewp: Option<f64>,
    pub altim: Option<f64>,
    pub wdir: Option<NumberOrText>,
    pub wspd: Option<NumberOrText>,
    pub wgst: Option<NumberOrText>,
    pub visib: Option<NumberOrText>,
    pub wx_string: Option<String>,
    pub fltcat: Option<String>,
    pub cover: Option<CoverField>,
    #[serde(default)]
    pub clouds: Vec<CloudLayer>,
    pub ceiling: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TafPeriod {
    #[serde(alias = "timeFrom")]
    pub fcst_time: Option<ApiTime>,
    pub temp: Option<serde_json::Value>,
    pub wdir: Option<NumberOrText>,
    pub wspd: Option<NumberOrText>,
    pub wx_string: Option<String>,
    pub fltcat: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TafRecord {
    #[serde(default, rename = "rawTAF")]
    pub raw_taf: String,
    #[serde(default)]
    pub fcsts: Vec<TafPeriod>,
}

/// Station entry returned by a bounding-box lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    #[serde(default)]
    pub icao_id: String,
}

impl MetarRecord {
    pub fn into_report(self) -> WeatherReport {
        let location = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(format!(
                "Station {} ({:.4}, {:.4})",
                self.icao_id, lat, lon
            )),
            _ => None,
        };

        let temperature_c = self.temp.unwrap_or_default();
        let humidity_pct = match (self.temp, self.dewp) {
            (Some(temp), Some(dewp)) => relative_humidity(temp, dewp),
            _ => 0.0,
        };

        let (altimeter_inhg, pressure_hpa) = match self.altim {
            Some(altim) if altim > HPA_ALTIMETER_THRESHOLD => {
                (Some(altim / HPA_PER_INHG), Some(altim))
            }
            Some(altim) => (Some(altim), Some(inhg_to_hpa(altim))),
            None => (None, None),
        };

        let flight_category = self.fltcat.as_deref().map(FlightCategory::parse);
        let condition = compose_condition(flight_category.as_ref(), self.wx_string.as_deref());

        let layers = if self.clouds.is_empty() {
            match &self.cover {
                Some(CoverField::Layers(layers)) => layers.as_slice(),
                _ => &[],
            }
        } else {
            self.clouds.as_slice()
        };
        let sky_cover = format_sky_cover(layers);

        WeatherReport {
            station_id: self.icao_id,
            location,
            observed_at: self.obs_time.as_ref().and_then(ApiTime::to_utc),
            raw_metar: self.raw_ob,
            raw_taf: None,
            temperature_c,
            dewpoint_c: self.dewp,
            humidity_pct,
            pressure_hpa,
            altimeter_inhg,
            wind_direction_deg: self.wdir.as_ref().and_then(NumberOrText::value),
            wind_speed_kt: value_or_zero(self.wspd.as_ref()),
            wind_gust_kt: value_or_zero(self.wgst.as_ref()),
            visibility_mi: value_or_zero(self.visib.as_ref()),
            flight_category,
            condition,
            sky_cover,
            ceiling_ft: self.ceiling,
            forecast: Vec::new(),
        }
    }
}

impl TafRecord {
    /// Attach the raw TAF and its first forecast periods to a report.
    pub fn apply_to(self, report: &mut WeatherReport) {
        report.raw_taf = Some(self.raw_taf).filter(|raw| !raw.is_empty());
        report.forecast = self
            .fcsts
            .into_iter()
            .take(MAX_FORECAST_PERIODS)
            .map(TafPeriod::into_forecast)
            .collect();
    }
}

impl TafPeriod {
    fn into_forecast(self) -> ForecastPeriod {
        let category = self.fltcat.as_deref().map(FlightCategory::parse);
        ForecastPeriod {
            time: self.fcst_time.as_ref().and_then(ApiTime::to_utc),
            condition: compose_condition(category.as_ref(), self.wx_string.as_deref()),
            temperature_c: self.temp.as_ref().and_then(serde_json::Value::as_f64),
            wind_speed_kt: value_or_zero(self.wspd.as_ref()),
            wind_direction_deg: self.wdir.as_ref().and_then(NumberOrText::value),
        }
    }
}

fn value_or_zero(field: Option<&NumberOrText>) -> f64 {
    field.and_then(NumberOrText::value).unwrap_or(0.0)
}

/// "BKN at 2500 ft, OVC at 4000 ft", or "Clear" when there are no layers.
pub fn format_sky_cover(layers: &[CloudLayer]) -> String {
    if layers.is_empty() {
        return "Clear".to_string();
    }
    layers
        .iter()
        .map(|layer| match layer.base {
            Some(base) => format!("{} at {} ft", layer.cover, base as i64),
            None => layer.cover.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flight-category text followed by decoded present weather, comma separated.
fn compose_condition(category: Option<&FlightCategory>, wx: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(category) = category {
        parts.push(category.condition_text().to_string());
    }
    if let Some(weather) = wx.map(describe_present_weather).filter(|w| !w.is_empty()) {
        parts.push(weather);
    }
    parts.join(", ")
}

/// Decode METAR present-weather groups ("+TSRA BR") into plain words
/// ("heavy thunderstorm rain, mist").
pub fn describe_present_weather(wx: &str) -> String {
    const CODES: &[(&str, &str)] = &[
        ("TS", "thunderstorm"),
        ("SH", "showers"),
        ("FZ", "freezing"),
        ("DZ", "drizzle"),
        ("RA", "rain"),
        ("SN", "snow"),
        ("SG", "snow grains"),
        ("PL", "sleet"),
        ("GR", "hail"),
        ("GS", "small hail"),
        ("FG", "fog"),
        ("BR", "mist"),
        ("HZ", "haze"),
    ];

    wx.split_whitespace()
        .filter_map(|group| {
            let (intensity, mut rest) = match group.strip_prefix('+') {
                Some(rest) => (Some("heavy"), rest),
                None => match group.strip_prefix('-') {
                    Some(rest) => (Some("light"), rest),
                    None => (None, group),
                },
            };
            rest = rest.strip_prefix("VC").unwrap_or(rest);

            let mut words: Vec<&str> = intensity.into_iter().collect();
            while let (Some(code), Some(tail)) = (rest.get(..2), rest.get(2..)) {
                if let Some((_, word)) = CODES.iter().find(|(c, _)| *c == code) {
                    words.push(*word);
                }
                rest = tail;
            }

            let decoded = words.len() > usize::from(intensity.is_some());
            decoded.then(|| words.join(" "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const METAR_JSON: &str = r#"[{
        "icaoId": "KDFW",
        "rawOb": "KDFW 161753Z 18012G20KT 10SM BKN025 OVC040 24/14 A2992",
        "lat": 32.8968,
        "lon": -97.038,
        "obsTime": 1760636580,
        "temp": 24.0,
        "dewp": 14.0,
        "altim": 29.92,
        "wdir": 180,
        "wspd": 12,
        "wgst": 20,
        "visib": "10+",
        "fltcat": "MVFR",
        "clouds": [{"cover": "BKN", "base": 2500}, {"cover": "OVC", "base": 4000}],
        "ceiling": 2500
    }]"#;

    #[test]
    fn test_metar_conversion() {
        let records: Vec<MetarRecord> = serde_json::from_str(METAR_JSON).unwrap();
        let report = records.into_iter().next().unwrap().into_report();

        assert_eq!(report.station_id, "KDFW");
        assert_eq!(report.location.as_deref(), Some("Station KDFW (32.8968, -97.0380)"));
        assert_eq!(report.wind_speed_kt, 12.0);
        assert_eq!(report.wind_gust_kt, 20.0);
        assert_eq!(report.wind_direction_deg, Some(180.0));
        assert_eq!(report.visibility_mi, 10.0);
        assert_eq!(report.condition, "Partly Cloudy");
        assert_eq!(report.sky_cover, "BKN at 2500 ft, OVC at 4000 ft");
        assert_eq!(report.ceiling_ft, Some(2500.0));
        assert!((report.pressure_hpa.unwrap() - 1013.21).abs() < 0.01);
        assert!(report.humidity_pct > 50.0 && report.humidity_pct < 55.0);
        assert_eq!(report.observed_at.unwrap().timestamp(), 1760636580);
    }

    #[test]
    fn test_text_fields_and_hpa_altimeter() {
        let json = r#"{
            "icaoId": "EGLL",
            "obsTime": "2025-10-16T12:20:00Z",
            "temp": 9, "dewp": 9,
            "altim": 1009,
            "wdir": "VRB", "wspd": "3",
            "visib": 6.21,
            "wxString": "-RA BR",
            "fltcat": "VFR",
            "cover": "OVC"
        }"#;
        let report = serde_json::from_str::<MetarRecord>(json).unwrap().into_report();

        assert_eq!(report.wind_direction_deg, None);
        assert_eq!(report.wind_speed_kt, 3.0);
        assert_eq!(report.wind_gust_kt, 0.0);
        assert_eq!(report.pressure_hpa, Some(1009.0));
        assert!((report.altimeter_inhg.unwrap() - 29.80).abs() < 0.01);
        assert!((report.humidity_pct - 100.0).abs() < 1e-9);
        assert_eq!(report.condition, "Clear, light rain, mist");
        assert_eq!(report.sky_cover, "Clear");
        assert_eq!(report.location, None);
        assert!(report.observed_at.is_some());
    }

    #[test]
    fn test_taf_keeps_first_24_periods() {
        let periods: Vec<serde_json::Value> = (0..30)
            .map(|i| {
                serde_json::json!({
                    "timeFrom": 1760637600 + i * 3600,
                    "wdir": 200, "wspd": 10 + i,
                    "fltcat": "IFR"
                })
            })
            .collect();
        let json = serde_json::json!({"rawTAF": "TAF KDFW ...", "fcsts": periods});
        let taf: TafRecord = serde_json::from_value(json).unwrap();

        let mut report = WeatherReport::default();
        taf.apply_to(&mut report);

        assert_eq!(report.raw_taf.as_deref(), Some("TAF KDFW ..."));
        assert_eq!(report.forecast.len(), MAX_FORECAST_PERIODS);
        assert_eq!(report.forecast[0].condition, "Cloudy");
        assert_eq!(report.forecast[23].wind_speed_kt, 33.0);
        assert!(report.forecast[0].time.is_some());
    }

    #[test]
    fn test_present_weather_decoding() {
        assert_eq!(describe_present_weather("+TSRA"), "heavy thunderstorm rain");
        assert_eq!(describe_present_weather("-SHSN FG"), "light showers snow, fog");
        assert_eq!(describe_present_weather("VCTS"), "thunderstorm");
        assert_eq!(describe_present_weather("+"), "");
        assert_eq!(describe_present_weather(""), "");
    }

    #[test]
    fn test_number_or_text() {
        assert_eq!(NumberOrText::Text("10+".into()).value(), Some(10.0));
        assert_eq!(NumberOrText::Text(" 1.5 ".into()).value(), Some(1.5));
        assert_eq!(NumberOrText::Text("VRB".into()).value(), None);
        assert_eq!(NumberOrText::Number(7.0).value(), Some(7.0));
    }
}
