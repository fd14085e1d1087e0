// tests/test_config.rs
use std::fs;

use komcast_core::error::ConfigError;
use komcast_core::{load_config, save_config, ForecastConfig, Thresholds, Units};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(dir.path().join("komcast.json")).expect("defaults");

    assert_eq!(config, ForecastConfig::default());
    assert_eq!(
        config.thresholds,
        Thresholds {
            min_wind_speed: 15.0,
            direction_tolerance_deg: 30.0,
            min_favorability_pct: 70,
        }
    );
    assert_eq!(config.horizon_days, 5);
    assert_eq!(config.tz().unwrap(), chrono_tz::America::New_York);
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("komcast.json");

    let config = ForecastConfig {
        thresholds: Thresholds {
            min_wind_speed: 6.0,
            direction_tolerance_deg: 20.0,
            min_favorability_pct: 80,
        },
        units: Units::Metric,
        timezone: "Europe/Oslo".to_string(),
        include_held_koms: true,
        ..ForecastConfig::default()
    };
    save_config(&config, &path).expect("kunne ikke lagre konfig");

    let loaded = load_config(&path).expect("kunne ikke laste konfig");
    assert_eq!(loaded, config);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("komcast.json");
    fs::write(&path, r#"{"thresholds": {"min_favorability_pct": 95}, "units": "metric"}"#).unwrap();

    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.thresholds.min_favorability_pct, 95);
    assert_eq!(loaded.thresholds.min_wind_speed, 15.0);
    assert_eq!(loaded.units, Units::Metric);
    assert_eq!(loaded.forecast_steps, 40);
}

#[test]
fn malformed_json_reports_field_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("komcast.json");
    fs::write(&path, r#"{"thresholds": {"min_wind_speed": "fast"}}"#).unwrap();

    match load_config(&path) {
        Err(ConfigError::Json { json_path, .. }) => {
            assert_eq!(json_path, "thresholds.min_wind_speed")
        }
        other => panic!("expected json error, got {other:?}"),
    }
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        ForecastConfig {
            thresholds: Thresholds {
                min_wind_speed: 0.0,
                ..Thresholds::default()
            },
            ..ForecastConfig::default()
        },
        ForecastConfig {
            thresholds: Thresholds {
                direction_tolerance_deg: 200.0,
                ..Thresholds::default()
            },
            ..ForecastConfig::default()
        },
        ForecastConfig {
            thresholds: Thresholds {
                min_favorability_pct: 101,
                ..Thresholds::default()
            },
            ..ForecastConfig::default()
        },
        ForecastConfig {
            horizon_days: 0,
            ..ForecastConfig::default()
        },
    ];
    for config in bad {
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    let tz = ForecastConfig {
        timezone: "Mars/Olympus".to_string(),
        ..ForecastConfig::default()
    };
    assert!(matches!(tz.validate(), Err(ConfigError::UnknownTimezone(_))));
}
