use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{ForecastSnapshot, Place},
};

pub mod openmeteo;

pub use openmeteo::OpenMeteo;

/// Geocoding: free-text query to place candidates.
#[async_trait]
pub trait PlaceSearch: Send + Sync + Debug {
    /// Up to `count` candidates; an empty list is a valid outcome.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<Place>, WeatherError>;
}

/// Current, hourly and daily forecast for a resolved place.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Single attempt, no retry.
    async fn fetch_forecast(&self, place: &Place) -> Result<ForecastSnapshot, WeatherError>;
}
