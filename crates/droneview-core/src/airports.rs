//! Airport table, ICAO handling and operator presets.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::spatial::haversine_distance;

/// Airport used when nothing else is configured.
pub const DEFAULT_AIRPORT: &str = "KDFW";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airport {
    pub icao: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

/// Major reporting stations offered for selection and nearest-station fallback.
pub const MAJOR_AIRPORTS: &[Airport] = &[
    Airport { icao: "KATL", name: "Atlanta Hartsfield-Jackson", lat: 33.6367, lon: -84.4281 },
    Airport { icao: "KBOS", name: "Boston Logan", lat: 42.3656, lon: -71.0096 },
    Airport { icao: "KORD", name: "Chicago O'Hare", lat: 41.9786, lon: -87.9048 },
    Airport { icao: "KDFW", name: "Dallas/Fort Worth", lat: 32.8968, lon: -97.0380 },
    Airport { icao: "KDEN", name: "Denver International", lat: 39.8617, lon: -104.6731 },
    Airport { icao: "KDTW", name: "Detroit Metro", lat: 42.2124, lon: -83.3534 },
    Airport { icao: "KIAH", name: "Houston Bush", lat: 29.9844, lon: -95.3414 },
    Airport { icao: "KJFK", name: "New York JFK", lat: 40.6398, lon: -73.7789 },
    Airport { icao: "KLAS", name: "Las Vegas McCarran", lat: 36.0840, lon: -115.1537 },
    Airport { icao: "KLAX", name: "Los Angeles LAX", lat: 33.9425, lon: -118.4081 },
    Airport { icao: "KMIA", name: "Miami International", lat: 25.7932, lon: -80.2906 },
    Airport { icao: "KMSP", name: "Minneapolis-St. Paul", lat: 44.8848, lon: -93.2223 },
    Airport { icao: "KPHL", name: "Philadelphia", lat: 39.8719, lon: -75.2411 },
    Airport { icao: "KPHX", name: "Phoenix Sky Harbor", lat: 33.4343, lon: -112.0116 },
    Airport { icao: "KSEA", name: "Seattle-Tacoma", lat: 47.4502, lon: -122.3088 },
    Airport { icao: "KSFO", name: "San Francisco", lat: 37.6213, lon: -122.3790 },
];

impl Airport {
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.icao)
    }
}

/// Trim and uppercase a station code, rejecting anything that isn't 3-4 alphanumerics.
pub fn normalize_icao(code: &str) -> Result<String> {
    let cleaned = code.trim().to_ascii_uppercase();
    let valid = (3..=4).contains(&cleaned.len())
        && cleaned.chars().all(|c| c.is_ascii_alphanumeric());
    if valid {
        Ok(cleaned)
    } else {
        Err(CoreError::InvalidIcao(code.to_string()))
    }
}

pub fn find_airport(icao: &str) -> Option<&'static Airport> {
    let icao = icao.trim();
    MAJOR_AIRPORTS
        .iter()
        .find(|airport| airport.icao.eq_ignore_ascii_case(icao))
}

/// Closest major airport to a position.
pub fn nearest_airport(lat: f64, lon: f64) -> &'static Airport {
    MAJOR_AIRPORTS
        .iter()
        .map(|airport| (airport, haversine_distance(lat, lon, airport.lat, airport.lon)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(airport, _)| airport)
        .unwrap_or(&MAJOR_AIRPORTS[3])
}

/// A named shortcut to a weather station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportPreset {
    pub name: String,
    pub icao_code: String,
    #[serde(default)]
    pub description: String,
}

impl AirportPreset {
    pub fn new(
        name: impl Into<String>,
        icao_code: &str,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into().trim().to_string(),
            icao_code: normalize_icao(icao_code)?,
            description: description.into().trim().to_string(),
        })
    }

    pub fn display_label(&self) -> String {
        let mut label = format!("{} ({})", self.name, self.icao_code);
        if !self.description.is_empty() {
            label.push_str(" - ");
            label.push_str(&self.description);
        }
        label
    }
}

/// Ordered collection of presets, unique by ICAO code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetBook {
    presets: Vec<AirportPreset>,
}

impl PresetBook {
    pub fn add(&mut self, preset: AirportPreset) -> Result<()> {
        if self.find(&preset.icao_code).is_some() {
            return Err(CoreError::DuplicatePreset(preset.icao_code));
        }
        self.presets.push(preset);
        Ok(())
    }

    /// Remove the preset for a code. Returns the removed preset, if any.
    pub fn remove(&mut self, icao_code: &str) -> Option<AirportPreset> {
        let index = self
            .presets
            .iter()
            .position(|preset| preset.icao_code.eq_ignore_ascii_case(icao_code.trim()))?;
        Some(self.presets.remove(index))
    }

    pub fn find(&self, icao_code: &str) -> Option<&AirportPreset> {
        self.presets
            .iter()
            .find(|preset| preset.icao_code.eq_ignore_ascii_case(icao_code.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AirportPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_icao() {
        assert_eq!(normalize_icao(" kdfw ").unwrap(), "KDFW");
        assert_eq!(normalize_icao("lax").unwrap(), "LAX");
        assert!(normalize_icao("").is_err());
        assert!(normalize_icao("K-DF").is_err());
        assert!(normalize_icao("KDFWX").is_err());
    }

    #[test]
    fn test_nearest_airport() {
        // Irvine, CA -> LAX
        assert_eq!(nearest_airport(33.6846, -117.8265).icao, "KLAX");
        // Fort Worth -> DFW
        assert_eq!(nearest_airport(32.75, -97.33).icao, "KDFW");
        // Tacoma -> SEA
        assert_eq!(nearest_airport(47.25, -122.44).icao, "KSEA");
    }

    #[test]
    fn test_find_airport() {
        assert_eq!(find_airport("kjfk").map(|a| a.name), Some("New York JFK"));
        assert!(find_airport("EGLL").is_none());
        assert_eq!(find_airport(DEFAULT_AIRPORT).unwrap().label(), "Dallas/Fort Worth (KDFW)");
    }

    #[test]
    fn test_preset_labels() {
        let preset = AirportPreset::new("Home Field", "kdfw", "Practice area").unwrap();
        assert_eq!(preset.display_label(), "Home Field (KDFW) - Practice area");

        let bare = AirportPreset::new("Coast", "KSFO", "").unwrap();
        assert_eq!(bare.display_label(), "Coast (KSFO)");
    }

    #[test]
    fn test_preset_book_rejects_duplicates() {
        let mut book = PresetBook::default();
        book.add(AirportPreset::new("Home", "KDFW", "").unwrap()).unwrap();

        let err = book
            .add(AirportPreset::new("Other", "kdfw", "").unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), "A preset for this airport already exists.");
        assert_eq!(book.len(), 1);

        assert!(book.remove("kdfw").is_some());
        assert!(book.is_empty());
        assert!(book.remove("KDFW").is_none());
    }
}
