use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Display unit preference. Data is always stored in metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    #[default]
    Metric,
    Imperial,
}

impl UnitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitMode::Metric => "metric",
            UnitMode::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitMode] {
        &[UnitMode::Metric, UnitMode::Imperial]
    }

    pub fn temp_suffix(&self) -> &'static str {
        match self {
            UnitMode::Metric => "°C",
            UnitMode::Imperial => "°F",
        }
    }

    pub fn wind_suffix(&self) -> &'static str {
        match self {
            UnitMode::Metric => "m/s",
            UnitMode::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(UnitMode::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(UnitMode::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit mode '{value}'. Supported modes: metric, imperial."
            )),
        }
    }
}

/// Convert a Celsius value for display in `mode`.
pub fn convert(temp_c: f64, mode: UnitMode) -> f64 {
    match mode {
        UnitMode::Metric => temp_c,
        UnitMode::Imperial => temp_c * 9.0 / 5.0 + 32.0,
    }
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_display(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Converted, rounded temperature with its unit suffix, e.g. `"21°C"`.
pub fn format_temp(temp_c: f64, mode: UnitMode) -> String {
    format!("{}{}", round_display(convert(temp_c, mode)), mode.temp_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_is_identity() {
        assert_eq!(convert(0.0, UnitMode::Metric), 0.0);
        assert_eq!(convert(-12.3, UnitMode::Metric), -12.3);
    }

    #[test]
    fn imperial_known_points() {
        assert_eq!(convert(0.0, UnitMode::Imperial), 32.0);
        assert_eq!(convert(100.0, UnitMode::Imperial), 212.0);
        assert_eq!(convert(-40.0, UnitMode::Imperial), -40.0);
    }

    #[test]
    fn rounding_goes_up_on_halves() {
        assert_eq!(round_display(2.5), 3);
        assert_eq!(round_display(-2.5), -2);
        assert_eq!(round_display(-2.6), -3);
        assert_eq!(round_display(7.49), 7);
    }

    #[test]
    fn format_temp_applies_suffix() {
        assert_eq!(format_temp(21.4, UnitMode::Metric), "21°C");
        assert_eq!(format_temp(21.4, UnitMode::Imperial), "71°F");
    }

    #[test]
    fn unit_mode_str_roundtrip() {
        for mode in UnitMode::all() {
            let parsed: UnitMode = mode.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*mode, parsed);
        }
    }

    #[test]
    fn unknown_unit_mode_error() {
        let err = "kelvin".parse::<UnitMode>().unwrap_err();
        assert!(err.to_string().contains("Unknown unit mode"));
    }

    #[test]
    fn suffixes_follow_mode() {
        assert_eq!(UnitMode::Metric.wind_suffix(), "m/s");
        assert_eq!(UnitMode::Imperial.wind_suffix(), "mph");
        assert_eq!(UnitMode::Imperial.temp_suffix(), "°F");
    }
}
