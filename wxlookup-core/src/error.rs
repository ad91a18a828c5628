use thiserror::Error;

/// Failures while talking to the weather provider.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    /// A newer request superseded this one. Never surfaced to the user.
    #[error("Request was superseded")]
    Cancelled,

    #[error("Location error: {0}")]
    Geolocation(#[from] GeolocationError),
}

impl WeatherError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WeatherError::Cancelled)
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}
