use serde::{Deserialize, Serialize};

/// Name used for a place resolved from device coordinates.
pub const MY_LOCATION: &str = "My location";

/// A resolved geographic location candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    /// ISO country code; empty when unknown.
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl Place {
    pub fn new(name: impl Into<String>, country: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            lat,
            lon,
        }
    }

    /// Place built from a geolocation fix.
    pub fn my_location(coords: Coordinates) -> Self {
        Self::new(MY_LOCATION, "", coords.latitude, coords.longitude)
    }

    /// `name`, followed by `, country` when a country is known.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub humidity_pct: u8,
    /// Provider value in m/s, never converted.
    pub wind_speed_ms: f64,
    pub code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyEntry {
    pub time_iso: String,
    pub temp_c: f64,
    pub code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub date_iso: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub code: i32,
}

/// Full forecast payload for one place. Temperatures are always raw Celsius;
/// unit conversion and code classification happen at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub current: CurrentConditions,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
}
