// core/src/sky.rs
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Symbol for ikonkoder vi ikke kjenner.
pub const DEFAULT_SKY_GLYPH: &str = "⛅";

// OpenWeatherMap ikonkoder (dag/natt)
static ICON_GLYPHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("01d", "☀️"),
        ("01n", "🌑"),
        ("02d", "🌤️"),
        ("02n", "☁️"),
        ("03d", "☁️"),
        ("03n", "☁️"),
        ("04d", "☁️"),
        ("04n", "☁️"),
        ("09d", "🌧️"),
        ("09n", "🌧️"),
        ("10d", "🌦️"),
        ("10n", "🌧️"),
        ("11d", "🌩️"),
        ("11n", "🌩️"),
        ("13d", "❄️"),
        ("13n", "❄️"),
        ("50d", "🌫️"),
        ("50n", "🌫️"),
    ])
});

/// Ikonkode → visningssymbol. Ukjente koder faller tilbake til et generisk symbol.
pub fn sky_glyph(code: &str) -> &'static str {
    ICON_GLYPHS
        .get(code.trim())
        .copied()
        .unwrap_or(DEFAULT_SKY_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_codes() {
        assert_eq!(sky_glyph("01d"), "☀️");
        assert_eq!(sky_glyph(" 10n "), "🌧️");
        assert_eq!(sky_glyph("99x"), DEFAULT_SKY_GLYPH);
        assert_eq!(sky_glyph(""), DEFAULT_SKY_GLYPH);
    }
}
