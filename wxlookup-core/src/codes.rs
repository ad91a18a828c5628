//! Open-Meteo WMO weather code classification.
//! See: https://open-meteo.com/en/docs#weathervariables

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub icon: &'static str,
    pub label: &'static str,
}

impl Condition {
    pub const UNKNOWN: Condition = Condition {
        icon: "❔",
        label: "—",
    };
}

struct Entry {
    codes: &'static [i32],
    condition: Condition,
}

const fn entry(codes: &'static [i32], label: &'static str, icon: &'static str) -> Entry {
    Entry {
        codes,
        condition: Condition { icon, label },
    }
}

// First match wins.
const TABLE: &[Entry] = &[
    entry(&[0], "Clear", "☀️"),
    entry(&[1, 2], "Partly cloudy", "🌤️"),
    entry(&[3], "Overcast", "☁️"),
    entry(&[45, 48], "Fog", "🌫️"),
    entry(&[51, 53, 55, 56, 57], "Drizzle", "🌦️"),
    entry(&[61, 63, 65, 66, 67], "Rain", "🌧️"),
    entry(&[71, 73, 75, 77], "Snow", "❄️"),
    entry(&[80, 81, 82], "Showers", "🌦️"),
    entry(&[95, 96, 99], "Thunderstorm", "⛈️"),
];

/// Map a provider weather code to an icon and label. Unknown codes yield
/// [`Condition::UNKNOWN`].
pub fn classify(code: i32) -> Condition {
    TABLE
        .iter()
        .find(|e| e.codes.contains(&code))
        .map(|e| e.condition)
        .unwrap_or(Condition::UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_sky() {
        assert_eq!(classify(0).label, "Clear");
        assert_eq!(classify(0).icon, "☀️");
    }

    #[test]
    fn rain_group() {
        for code in [61, 63, 65, 66, 67] {
            assert_eq!(classify(code).label, "Rain", "code {code}");
        }
    }

    #[test]
    fn drizzle_and_showers_share_icon() {
        assert_eq!(classify(53).icon, classify(81).icon);
        assert_eq!(classify(53).label, "Drizzle");
        assert_eq!(classify(81).label, "Showers");
    }

    #[test]
    fn thunderstorm_group() {
        assert_eq!(classify(95).label, "Thunderstorm");
        assert_eq!(classify(99).label, "Thunderstorm");
    }

    #[test]
    fn unknown_codes_fall_back() {
        assert_eq!(classify(9999), Condition::UNKNOWN);
        assert_eq!(classify(-1), Condition::UNKNOWN);
        // snow showers are not in the table
        assert_eq!(classify(85), Condition::UNKNOWN);
    }
}
