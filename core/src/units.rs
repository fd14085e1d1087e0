// core/src/units.rs
use serde::{Deserialize, Serialize};

pub const KM_TO_MILES: f64 = 0.621371;
pub const MILES_TO_KM: f64 = 1.0 / KM_TO_MILES;

// --- RoundTo trait (offentlig, brukt av models.rs) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Enhetssystem. Styrer både API-kallet (`units=`) og visningen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    /// Verdi for OpenWeatherMap sin `units`-parameter.
    pub fn api_param(self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
        }
    }

    /// Enhet for vindhastighet slik leverandøren rapporterer den.
    pub fn wind_label(self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric => "m/s",
        }
    }

    /// Enhet for segmentfart (utregnet fra distanse/tid).
    pub fn speed_label(self) -> &'static str {
        match self {
            Units::Imperial => "mph",
            Units::Metric => "km/h",
        }
    }

    pub fn temperature_label(self) -> &'static str {
        match self {
            Units::Imperial => "°F",
            Units::Metric => "°C",
        }
    }

    /// km/t → valgt fartsenhet.
    pub fn speed_from_kmh(self, kmh: f64) -> f64 {
        match self {
            Units::Imperial => kmh * KM_TO_MILES,
            Units::Metric => kmh,
        }
    }
}

/// Leser ledende tall fra en verdi med enhet ("1.43 km" => 1.43).
pub fn leading_number(text: &str) -> Option<f64> {
    let t = text.trim();
    let end = t
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
        .map(|(i, _)| i)
        .unwrap_or(t.len());
    let v = t[..end].parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Distanse i km. Godtar "km", "mi" og "m" som suffiks; uten suffiks antas km.
pub fn parse_distance_km(text: &str) -> Option<f64> {
    let value = leading_number(text)?;
    let unit = text.trim().trim_start_matches(|c: char| {
        c.is_ascii_digit() || c == '.' || c == '-' || c == '+'
    });
    let km = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "km" => value,
        "mi" | "mile" | "miles" => value * MILES_TO_KM,
        "m" => value / 1000.0,
        _ => return None,
    };
    (km > 0.0).then_some(km)
}

/// Medgått tid i sekunder. Godtar "M:SS", "MM:SS min", "H:MM:SS" og "45s".
pub fn parse_elapsed_secs(text: &str) -> Option<u32> {
    let t = text.trim();
    let t = t
        .strip_suffix("min")
        .or_else(|| t.strip_suffix('s'))
        .unwrap_or(t)
        .trim();
    if t.is_empty() {
        return None;
    }

    let mut total: u32 = 0;
    let parts: Vec<&str> = t.split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    for (i, part) in parts.iter().enumerate() {
        let v: u32 = part.trim().parse().ok()?;
        // sekunder/minutter etter første ledd må være < 60
        if i > 0 && v >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(v)?;
    }
    (total > 0).then_some(total)
}

/// Snittfart (km/t) fra distanse og tid.
pub fn speed_kmh(distance_km: f64, elapsed_secs: u32) -> f64 {
    if elapsed_secs == 0 {
        return 0.0;
    }
    distance_km / (elapsed_secs as f64 / 3600.0)
}

/// Sekunder → "M:SS" (fortegn håndteres av kaller).
pub fn format_mm_ss(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Medgått tid for visning: "M:SS", eller "H:MM:SS" fra én time.
pub fn format_elapsed(secs: u32) -> String {
    if secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format_mm_ss(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_formats() {
        assert_eq!(parse_elapsed_secs("2:05 min"), Some(125));
        assert_eq!(parse_elapsed_secs("12:30"), Some(750));
        assert_eq!(parse_elapsed_secs("1:02:03"), Some(3723));
        assert_eq!(parse_elapsed_secs("45s"), Some(45));
        assert_eq!(parse_elapsed_secs("1:75"), None);
        assert_eq!(parse_elapsed_secs("abc"), None);
        assert_eq!(parse_elapsed_secs(""), None);
    }

    #[test]
    fn distance_suffixes() {
        assert_eq!(parse_distance_km("1.43 km"), Some(1.43));
        assert_eq!(parse_distance_km("850 m"), Some(0.85));
        assert_eq!(parse_distance_km("2"), Some(2.0));
        assert!((parse_distance_km("1 mi").unwrap() - 1.609344).abs() < 1e-3);
        assert_eq!(parse_distance_km("far"), None);
        assert_eq!(parse_distance_km("0 km"), None);
    }

    #[test]
    fn mm_ss() {
        assert_eq!(format_mm_ss(65), "1:05");
        assert_eq!(format_mm_ss(9), "0:09");
        assert_eq!(format_elapsed(3723), "1:02:03");
    }
}
