// core/src/config.rs
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::Location;
use crate::units::Units;

/// Miljøvariabel for OpenWeatherMap-nøkkelen.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Terskler for når et prognosepunkt regnes som gunstig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minste vindhastighet (samme enhet som prognosen)
    pub min_wind_speed: f64,
    /// Største tillatte avvik fra perfekt medvind (grader)
    pub direction_tolerance_deg: f64,
    /// Minste gunstighet i prosent
    pub min_favorability_pct: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_wind_speed: 15.0,
            direction_tolerance_deg: 30.0,
            min_favorability_pct: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub thresholds: Thresholds,
    /// Antall dager fremover vi vurderer
    pub horizon_days: u32,
    /// Start horisonten ved neste lokale midnatt
    pub skip_today: bool,
    pub location: Location,
    /// IANA-sone, f.eks. "America/New_York"
    pub timezone: String,
    pub units: Units,
    /// Antall 3-timers punkter (OpenWeatherMap `cnt`)
    pub forecast_steps: u32,
    pub catalog_path: PathBuf,
    /// Ta med segmenter der vi allerede har KOM
    pub include_held_koms: bool,
    pub sunrise_icon: String,
    pub sunset_icon: String,
    pub request_timeout_secs: u64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            horizon_days: 5,
            skip_today: true,
            // Charlotte, MI
            location: Location {
                lat: 42.5702,
                lon: -84.8352,
            },
            timezone: "America/New_York".to_string(),
            units: Units::Imperial,
            forecast_steps: 40,
            catalog_path: PathBuf::from("kom-list.csv"),
            include_held_koms: false,
            sunrise_icon: "☀️".to_string(),
            sunset_icon: "🌑".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl ForecastConfig {
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !(t.min_wind_speed.is_finite() && t.min_wind_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_wind_speed must be positive, got {}",
                t.min_wind_speed
            )));
        }
        if !(0.0..=180.0).contains(&t.direction_tolerance_deg) {
            return Err(ConfigError::Invalid(format!(
                "direction_tolerance_deg must be within 0..=180, got {}",
                t.direction_tolerance_deg
            )));
        }
        if t.min_favorability_pct > 100 {
            return Err(ConfigError::Invalid(format!(
                "min_favorability_pct must be at most 100, got {}",
                t.min_favorability_pct
            )));
        }
        if self.horizon_days == 0 {
            return Err(ConfigError::Invalid("horizon_days must be at least 1".into()));
        }
        if self.forecast_steps == 0 {
            return Err(ConfigError::Invalid("forecast_steps must be at least 1".into()));
        }
        if !(-90.0..=90.0).contains(&self.location.lat)
            || !(-180.0..=180.0).contains(&self.location.lon)
        {
            return Err(ConfigError::Invalid(format!(
                "location out of range: {}, {}",
                self.location.lat, self.location.lon
            )));
        }
        self.tz()?;
        Ok(())
    }
}

/// Leser inn konfig fra disk (JSON) og validerer den.
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> Result<ForecastConfig, ConfigError> {
    let path = path.as_ref();
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let de = &mut serde_json::Deserializer::from_str(&contents);
        let config: ForecastConfig =
            serde_path_to_error::deserialize(de).map_err(|e| ConfigError::Json {
                path: path.to_path_buf(),
                json_path: e.path().to_string(),
                message: e.inner().to_string(),
            })?;
        info!("config loaded from {}", path.display());
        config
    } else {
        warn!("config {} not found, using defaults", path.display());
        ForecastConfig::default()
    };

    config.validate()?;
    Ok(config)
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(config: &ForecastConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("config saved to {}", path.display());
    Ok(())
}
