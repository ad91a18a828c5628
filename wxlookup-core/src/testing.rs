//! In-crate fakes shared by unit tests.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};

use crate::{
    error::WeatherError,
    model::{CurrentConditions, DailyEntry, ForecastSnapshot, HourlyEntry, Place},
    provider::{ForecastSource, PlaceSearch},
    render::{DayCard, HourCard, NowView, Surface},
    units::UnitMode,
};

/// `hours` hourly and `days` daily entries starting Monday 2024-01-15.
pub fn sample_snapshot(hours: usize, days: usize) -> ForecastSnapshot {
    let start = NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date");

    ForecastSnapshot {
        current: CurrentConditions {
            temp_c: 5.5,
            humidity_pct: 75,
            wind_speed_ms: 3.2,
            code: 3,
        },
        hourly: (0..hours)
            .map(|i| HourlyEntry {
                time_iso: (start + ChronoDuration::hours(i as i64))
                    .format("%Y-%m-%dT%H:%M")
                    .to_string(),
                temp_c: 4.0 + i as f64 * 0.5,
                code: 2,
            })
            .collect(),
        daily: (0..days)
            .map(|i| DailyEntry {
                date_iso: (start + ChronoDuration::days(i as i64))
                    .format("%Y-%m-%d")
                    .to_string(),
                temp_max_c: 10.0,
                temp_min_c: 0.0,
                code: 61,
            })
            .collect(),
    }
}

/// Answers every query with one place named after it, unless overridden.
#[derive(Debug, Default)]
pub struct FakeSearch {
    results: HashMap<String, Vec<Place>>,
    delays: HashMap<String, Duration>,
    fail: bool,
    calls: Mutex<Vec<(String, usize)>>,
}

impl FakeSearch {
    pub fn with_results(mut self, query: &str, places: Vec<Place>) -> Self {
        self.results.insert(query.to_string(), places);
        self
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(q, _)| q.clone()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.calls.lock().iter().map(|(_, c)| *c).collect()
    }
}

#[async_trait]
impl PlaceSearch for FakeSearch {
    async fn search(&self, query: &str, count: usize) -> Result<Vec<Place>, WeatherError> {
        self.calls.lock().push((query.to_string(), count));

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            return Err(WeatherError::Parse("bad geocoding payload".into()));
        }

        let places = self
            .results
            .get(query)
            .cloned()
            .unwrap_or_else(|| vec![Place::new(query, "ZZ", 10.0, 20.0)]);
        Ok(places.into_iter().take(count).collect())
    }
}

/// Returns [`sample_snapshot`] unless a status is configured for the place.
#[derive(Debug, Default)]
pub struct FakeForecast {
    failures: HashMap<String, u16>,
    calls: Mutex<Vec<String>>,
}

impl FakeForecast {
    pub fn failing_for(mut self, place: &str, status: u16) -> Self {
        self.failures.insert(place.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ForecastSource for FakeForecast {
    async fn fetch_forecast(&self, place: &Place) -> Result<ForecastSnapshot, WeatherError> {
        self.calls.lock().push(place.name.clone());

        match self.failures.get(&place.name) {
            Some(status) => Err(WeatherError::Status {
                url: "fake://forecast".into(),
                status: *status,
                body: String::new(),
            }),
            None => Ok(sample_snapshot(24, 5)),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub now: Option<NowView>,
    pub hourly: Vec<HourCard>,
    pub daily: Vec<DayCard>,
    pub statuses: Vec<String>,
    pub units: Option<UnitMode>,
    pub renders: usize,
}

impl RecordingSurface {
    pub fn status(&self) -> &str {
        self.statuses.last().map(String::as_str).unwrap_or("")
    }
}

impl Surface for RecordingSurface {
    fn show_now(&mut self, view: &NowView) {
        self.now = Some(view.clone());
        self.renders += 1;
    }

    fn show_hourly(&mut self, cards: &[HourCard]) {
        self.hourly = cards.to_vec();
    }

    fn show_daily(&mut self, cards: &[DayCard]) {
        self.daily = cards.to_vec();
    }

    fn set_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn show_units(&mut self, mode: UnitMode) {
        self.units = Some(mode);
    }
}
