// core/src/compass.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Bredde på én kompass-sektor (16 streker).
pub const SECTOR_DEG: f64 = 22.5;

/// 16-punkts kompassrose, med klokka fra nord.
pub const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

static CARDINAL_DEGREES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, f64> = CARDINALS
        .iter()
        .enumerate()
        .map(|(i, label)| (*label, i as f64 * SECTOR_DEG))
        .collect();
    // utskrevne hovedretninger
    m.insert("NORTH", 0.0);
    m.insert("EAST", 90.0);
    m.insert("SOUTH", 180.0);
    m.insert("WEST", 270.0);
    m
});

/// Normaliser vinkel til [0, 360)
pub fn norm_deg(d: f64) -> f64 {
    let mut x = d % 360.0;
    if x < 0.0 {
        x += 360.0;
    }
    // -0.0 % 360 og avrunding helt oppunder 360
    if x >= 360.0 {
        x -= 360.0;
    }
    x
}

/// Grader → 16-punkts label. Grenseverdier rundes opp (11.25° => NNE).
pub fn degrees_to_cardinal(deg: f64) -> &'static str {
    if !deg.is_finite() {
        return CARDINALS[0];
    }
    let idx = (norm_deg(deg) / SECTOR_DEG + 0.5).floor() as usize;
    CARDINALS[idx % CARDINALS.len()]
}

/// Label → sektorens midtpunkt i grader. Ukjent label gir `None`.
pub fn cardinal_to_degrees(label: &str) -> Option<f64> {
    let key = label.trim().to_ascii_uppercase();
    CARDINAL_DEGREES.get(key.as_str()).copied()
}

/// Tolker en retning fra KOM-listen: enten label ("ENE") eller grader ("67.5", "67.5°").
pub fn parse_direction(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if let Some(deg) = cardinal_to_degrees(t) {
        return Some(deg);
    }
    let numeric = t.trim_end_matches('°').trim();
    match numeric.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(norm_deg(v)),
        _ => None,
    }
}

/// Minste vinkelavstand mellom to retninger, alltid i [0, 180].
pub fn angular_offset(a_deg: f64, b_deg: f64) -> f64 {
    let diff = (norm_deg(a_deg) - norm_deg(b_deg)).abs();
    diff.min(360.0 - diff)
}

/// Meteorologisk vindretning (hvorfra) → retningen vinden blåser mot.
pub fn wind_heading(wind_from_deg: f64) -> f64 {
    norm_deg(wind_from_deg + 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_rounds_to_next_label() {
        assert_eq!(degrees_to_cardinal(11.25), "NNE");
        assert_eq!(degrees_to_cardinal(11.24), "N");
        assert_eq!(degrees_to_cardinal(348.75), "N");
        assert_eq!(degrees_to_cardinal(-90.0), "W");
    }

    #[test]
    fn parse_direction_accepts_labels_and_degrees() {
        assert_eq!(parse_direction(" ene "), Some(67.5));
        assert_eq!(parse_direction("East"), Some(90.0));
        assert_eq!(parse_direction("400°"), Some(40.0));
        assert_eq!(parse_direction("sideways"), None);
        assert_eq!(parse_direction(""), None);
    }

    #[test]
    fn wind_heading_flips_half_turn() {
        assert_eq!(wind_heading(270.0), 90.0);
        assert_eq!(wind_heading(281.0), 101.0);
        assert_eq!(wind_heading(90.0), 270.0);
    }
}
