//! Core library for the `wxlookup` weather lookup tool.
//!
//! This crate defines:
//! - Shared domain models (places, forecast snapshots) and unit handling
//! - Open-Meteo geocoding and forecast clients behind provider traits
//! - A debounced, cancel-on-supersede place search coordinator
//! - The render pipeline and the application state driving it
//! - Configuration and persisted preferences
//!
//! It is used by `wxlookup-cli`, but any front end implementing
//! [`render::Surface`] can drive it.

pub mod app;
pub mod codes;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod prefs;
pub mod provider;
pub mod render;
pub mod search;
pub mod units;

#[cfg(test)]
mod testing;

pub use app::WeatherApp;
pub use codes::{Condition, classify};
pub use config::Config;
pub use error::{GeolocationError, WeatherError};
pub use model::{Coordinates, ForecastSnapshot, Place};
pub use prefs::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences};
pub use provider::{ForecastSource, OpenMeteo, PlaceSearch};
pub use render::Surface;
pub use search::{SearchCoordinator, Suggestions};
pub use units::{UnitMode, convert};
