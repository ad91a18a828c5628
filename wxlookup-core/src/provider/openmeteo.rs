use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::ApiConfig,
    error::WeatherError,
    model::{CurrentConditions, DailyEntry, ForecastSnapshot, HourlyEntry, Place},
};

use super::{ForecastSource, PlaceSearch};

const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,relative_humidity_2m,weather_code";
const HOURLY_FIELDS: &str = "temperature_2m,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weather_code";
const FORECAST_DAYS: &str = "5";

/// Open-Meteo geocoding and forecast client. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteo {
    pub fn new(api: &ApiConfig) -> Self {
        Self::with_client(Client::new(), api)
    }

    pub fn with_client(http: Client, api: &ApiConfig) -> Self {
        Self {
            http,
            geocoding_url: api.geocoding_url.clone(),
            forecast_url: api.forecast_url.clone(),
        }
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, WeatherError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl PlaceSearch for OpenMeteo {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<Place>, WeatherError> {
        debug!(query, count, "geocoding request");

        let body = self
            .get_text(
                &self.geocoding_url,
                &[
                    ("name", query.to_string()),
                    ("count", count.to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let parsed: OmGeocodingResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .map(Place::from)
            .collect())
    }
}

#[async_trait]
impl ForecastSource for OpenMeteo {
    async fn fetch_forecast(&self, place: &Place) -> Result<ForecastSnapshot, WeatherError> {
        debug!(place = %place.label(), lat = place.lat, lon = place.lon, "forecast request");

        let body = self
            .get_text(
                &self.forecast_url,
                &[
                    ("latitude", place.lat.to_string()),
                    ("longitude", place.lon.to_string()),
                    ("timezone", "auto".to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("hourly", HOURLY_FIELDS.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("forecast_days", FORECAST_DAYS.to_string()),
                    // the model stores m/s; Open-Meteo defaults to km/h
                    ("wind_speed_unit", "ms".to_string()),
                ],
            )
            .await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body)?;
        parsed.into_snapshot()
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    results: Option<Vec<OmGeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResult {
    name: String,
    country_code: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl From<OmGeocodingResult> for Place {
    fn from(r: OmGeocodingResult) -> Self {
        Place::new(r.name, r.country_code.unwrap_or_default(), r.latitude, r.longitude)
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: u8,
    wind_speed_10m: f64,
    weather_code: i32,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    weather_code: Vec<i32>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
    hourly: OmHourly,
    daily: OmDaily,
}

impl OmForecastResponse {
    /// Zip the provider's parallel arrays into entries.
    fn into_snapshot(self) -> Result<ForecastSnapshot, WeatherError> {
        let OmForecastResponse {
            current,
            hourly,
            daily,
        } = self;

        check_lengths(
            "hourly",
            hourly.time.len(),
            &[hourly.temperature_2m.len(), hourly.weather_code.len()],
        )?;
        check_lengths(
            "daily",
            daily.time.len(),
            &[
                daily.temperature_2m_max.len(),
                daily.temperature_2m_min.len(),
                daily.weather_code.len(),
            ],
        )?;

        let hourly = hourly
            .time
            .into_iter()
            .zip(hourly.temperature_2m)
            .zip(hourly.weather_code)
            .map(|((time_iso, temp_c), code)| HourlyEntry {
                time_iso,
                temp_c,
                code,
            })
            .collect();

        let daily = daily
            .time
            .into_iter()
            .zip(daily.temperature_2m_max)
            .zip(daily.temperature_2m_min)
            .zip(daily.weather_code)
            .map(|(((date_iso, temp_max_c), temp_min_c), code)| DailyEntry {
                date_iso,
                temp_max_c,
                temp_min_c,
                code,
            })
            .collect();

        Ok(ForecastSnapshot {
            current: CurrentConditions {
                temp_c: current.temperature_2m,
                humidity_pct: current.relative_humidity_2m,
                wind_speed_ms: current.wind_speed_10m,
                code: current.weather_code,
            },
            hourly,
            daily,
        })
    }
}

fn check_lengths(section: &str, expected: usize, actual: &[usize]) -> Result<(), WeatherError> {
    if actual.iter().all(|len| *len == expected) {
        Ok(())
    } else {
        Err(WeatherError::Parse(format!(
            "{section} arrays have mismatched lengths (time has {expected}, columns have {actual:?})"
        )))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
