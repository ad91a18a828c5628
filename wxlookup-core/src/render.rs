//! Snapshot to view models, and the display surface they are pushed to.
//!
//! Conversion and code classification happen here and only here; snapshots
//! keep raw Celsius and raw codes.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    codes::classify,
    model::{CurrentConditions, DailyEntry, ForecastSnapshot, HourlyEntry, Place},
    units::{UnitMode, convert, format_temp, round_display},
};

pub const HOURLY_LIMIT: usize = 12;
pub const DAILY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct NowView {
    pub place_label: String,
    pub icon: &'static str,
    pub temperature: i64,
    pub unit: &'static str,
    pub description: &'static str,
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourCard {
    pub time_label: String,
    pub temperature: String,
    pub icon: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub date_label: String,
    pub icon: &'static str,
    pub label: &'static str,
    pub range: String,
}

/// Where rendered views end up. Each call replaces the previous content of
/// that view.
pub trait Surface {
    fn show_now(&mut self, view: &NowView);
    fn show_hourly(&mut self, cards: &[HourCard]);
    fn show_daily(&mut self, cards: &[DayCard]);
    /// Empty message clears the status line.
    fn set_status(&mut self, message: &str);
    /// Reflect the active unit mode on the toggle.
    fn show_units(&mut self, _mode: UnitMode) {}
}

/// Redraw all three views.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    snapshot: &ForecastSnapshot,
    place: &Place,
    mode: UnitMode,
) {
    surface.show_now(&now_view(&snapshot.current, place, mode));
    surface.show_hourly(&hourly_view(&snapshot.hourly, mode));
    surface.show_daily(&daily_view(&snapshot.daily, mode));
}

pub fn now_view(current: &CurrentConditions, place: &Place, mode: UnitMode) -> NowView {
    let condition = classify(current.code);
    // Wind stays in the provider's m/s; only the label follows the mode.
    let meta = format!(
        "Humidity {}% • Wind {} {}",
        current.humidity_pct,
        round_display(current.wind_speed_ms),
        mode.wind_suffix()
    );

    NowView {
        place_label: place.label(),
        icon: condition.icon,
        temperature: round_display(convert(current.temp_c, mode)),
        unit: mode.temp_suffix(),
        description: condition.label,
        meta,
    }
}

pub fn hourly_view(hourly: &[HourlyEntry], mode: UnitMode) -> Vec<HourCard> {
    hourly
        .iter()
        .take(HOURLY_LIMIT)
        .map(|h| {
            let condition = classify(h.code);
            HourCard {
                time_label: format_hour(&h.time_iso),
                temperature: format_temp(h.temp_c, mode),
                icon: condition.icon,
                label: condition.label,
            }
        })
        .collect()
}

pub fn daily_view(daily: &[DailyEntry], mode: UnitMode) -> Vec<DayCard> {
    daily
        .iter()
        .take(DAILY_LIMIT)
        .map(|d| {
            let condition = classify(d.code);
            DayCard {
                date_label: format_day(&d.date_iso),
                icon: condition.icon,
                label: condition.label,
                range: format!(
                    "High {} • Low {}",
                    format_temp(d.temp_max_c, mode),
                    format_temp(d.temp_min_c, mode)
                ),
            }
        })
        .collect()
}

/// `2024-01-15T14:00` -> `Mon 14:00`. Unparseable input is shown as-is.
pub fn format_hour(iso: &str) -> String {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(iso, fmt).ok())
        .map(|t| t.format("%a %H:%M").to_string())
        .unwrap_or_else(|| iso.to_string())
}

/// `2024-01-15` -> `Mon, 15 Jan`. Unparseable input is shown as-is.
pub fn format_day(iso: &str) -> String {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .map(|d| d.format("%a, %d %b").to_string())
        .unwrap_or_else(|_| iso.to_string())
}
