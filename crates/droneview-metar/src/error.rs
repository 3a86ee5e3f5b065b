use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetarError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Aviation Weather request to '{url}' failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Aviation Weather API returned {status} for '{url}'")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Invalid JSON response from Aviation Weather {endpoint}")]
    InvalidJson {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No METAR data available for station '{0}'")]
    NoData(String),

    #[error("No aviation weather stations found near ({lat:.4}, {lon:.4})")]
    NoStation { lat: f64, lon: f64 },
}

pub type Result<T> = std::result::Result<T, MetarError>;
