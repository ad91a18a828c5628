//! Selection and preference state, and the load/render flow around it.

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{GeolocationError, WeatherError},
    geolocation::Locator,
    model::{ForecastSnapshot, Place},
    prefs::{PreferenceStore, Preferences},
    provider::{ForecastSource, PlaceSearch},
    render::{Surface, render},
    search::lookup_places,
    units::UnitMode,
};

pub const STATUS_LOADING: &str = "Loading weather…";
pub const STATUS_LOAD_FAILED: &str = "Failed to load weather.";
pub const STATUS_LOCATING: &str = "Finding your location…";
pub const STATUS_LOCATION_FAILED: &str = "Failed to get location.";
pub const STATUS_GEO_UNSUPPORTED: &str = "Geolocation not supported.";

/// Owns the current place, the unit mode and the last rendered snapshot.
///
/// Calls take `&mut self`, so loads are applied in the order they are issued.
pub struct WeatherApp<S: Surface> {
    forecast: Arc<dyn ForecastSource>,
    store: Box<dyn PreferenceStore>,
    prefs: Preferences,
    surface: S,
    mode: UnitMode,
    place: Option<Place>,
    /// Last successful fetch and the place it belongs to.
    rendered: Option<(Place, ForecastSnapshot)>,
    fallback: Place,
}

impl<S: Surface> WeatherApp<S> {
    pub fn new(
        forecast: Arc<dyn ForecastSource>,
        store: Box<dyn PreferenceStore>,
        mut surface: S,
        fallback: Place,
    ) -> Self {
        let prefs = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to load preferences, using defaults");
            Preferences::default()
        });
        let mode = prefs.unit_mode();
        surface.show_units(mode);

        Self {
            forecast,
            store,
            prefs,
            surface,
            mode,
            place: None,
            rendered: None,
            fallback,
        }
    }

    pub fn unit_mode(&self) -> UnitMode {
        self.mode
    }

    pub fn place(&self) -> Option<&Place> {
        self.place.as_ref()
    }

    pub fn snapshot(&self) -> Option<&ForecastSnapshot> {
        self.rendered.as_ref().map(|(_, snap)| snap)
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// City to resolve at startup: the remembered one, else the fallback.
    pub fn startup_query(&self) -> String {
        self.prefs
            .city_name
            .clone()
            .unwrap_or_else(|| self.fallback.name.clone())
    }

    /// Resolve the startup city and show its weather.
    pub async fn bootstrap(&mut self, search: &dyn PlaceSearch) -> Result<(), WeatherError> {
        let query = self.startup_query();
        let place = lookup_places(search, &query, 1)
            .await
            .into_iter()
            .next()
            .unwrap_or_else(|| self.fallback.clone());

        self.select_place(place).await
    }

    pub async fn select_place(&mut self, place: Place) -> Result<(), WeatherError> {
        self.place = Some(place.clone());
        self.load_weather(&place).await
    }

    /// Fetch and render one place. On failure the previous views stay as
    /// they are and only the status line changes.
    pub async fn load_weather(&mut self, place: &Place) -> Result<(), WeatherError> {
        self.surface.set_status(STATUS_LOADING);

        match self.forecast.fetch_forecast(place).await {
            Ok(snapshot) => {
                self.remember(|prefs| prefs.city_name = Some(place.name.clone()));
                render(&mut self.surface, &snapshot, place, self.mode);
                self.rendered = Some((place.clone(), snapshot));
                self.surface.set_status("");
                info!(place = %place.label(), "weather loaded");
                Ok(())
            }
            Err(err) => {
                warn!(place = %place.label(), error = %err, "failed to load weather");
                self.surface.set_status(STATUS_LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Switch units. A cached snapshot is re-rendered without a fetch; a
    /// fetch only happens when a place is selected but nothing is cached.
    pub async fn set_units(&mut self, mode: UnitMode) -> Result<(), WeatherError> {
        self.mode = mode;
        self.remember(|prefs| prefs.units = Some(mode));
        self.surface.show_units(mode);

        if let Some((place, snapshot)) = &self.rendered {
            render(&mut self.surface, snapshot, place, mode);
            return Ok(());
        }

        match self.place.clone() {
            Some(place) => self.load_weather(&place).await,
            None => Ok(()),
        }
    }

    pub async fn use_geolocation(&mut self, locator: &dyn Locator) -> Result<(), WeatherError> {
        self.surface.set_status(STATUS_LOCATING);

        match locator.locate().await {
            Ok(coords) => self.select_place(Place::my_location(coords)).await,
            Err(GeolocationError::Unsupported) => {
                self.surface.set_status(STATUS_GEO_UNSUPPORTED);
                Err(GeolocationError::Unsupported.into())
            }
            Err(err) => {
                warn!(error = %err, "geolocation failed");
                self.surface.set_status(STATUS_LOCATION_FAILED);
                Err(err.into())
            }
        }
    }

    fn remember(&mut self, update: impl FnOnce(&mut Preferences)) {
        update(&mut self.prefs);
        if let Err(err) = self.store.save(&self.prefs) {
            warn!(error = %err, "failed to persist preferences");
        }
    }
}
