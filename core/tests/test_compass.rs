// tests/test_compass.rs
use approx::assert_abs_diff_eq;

use komcast_core::compass::{
    angular_offset, cardinal_to_degrees, degrees_to_cardinal, CARDINALS, SECTOR_DEG,
};
use komcast_core::sky::{sky_glyph, DEFAULT_SKY_GLYPH};

#[test]
fn cardinal_round_trip_stays_within_half_sector() {
    for i in 0..36_000 {
        let deg = i as f64 / 100.0;
        let label = degrees_to_cardinal(deg);
        let back = cardinal_to_degrees(label).expect("every label maps back");
        let err = angular_offset(deg, back);
        assert!(
            err <= SECTOR_DEG / 2.0 + 1e-9,
            "{deg}° -> {label} -> {back}°, off by {err}"
        );
    }
}

#[test]
fn every_label_maps_to_its_sector_centre() {
    for (i, label) in CARDINALS.iter().enumerate() {
        assert_abs_diff_eq!(cardinal_to_degrees(label).unwrap(), i as f64 * 22.5);
        assert_eq!(degrees_to_cardinal(i as f64 * 22.5), *label);
    }
    assert_eq!(cardinal_to_degrees("nw"), Some(315.0));
    assert_eq!(cardinal_to_degrees("XYZ"), None);
}

#[test]
fn sector_boundaries_round_up() {
    assert_eq!(degrees_to_cardinal(11.25), "NNE");
    assert_eq!(degrees_to_cardinal(33.75), "NE");
    assert_eq!(degrees_to_cardinal(258.75), "W");
    assert_eq!(degrees_to_cardinal(281.25), "WNW");
    assert_eq!(degrees_to_cardinal(359.99), "N");
    assert_eq!(degrees_to_cardinal(720.0), "N");
}

#[test]
fn unknown_icon_falls_back() {
    assert_eq!(sky_glyph("13n"), "❄️");
    assert_eq!(sky_glyph("not-a-code"), DEFAULT_SKY_GLYPH);
}
