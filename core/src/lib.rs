// core/src/lib.rs
//! Vindprognose for KOM-forsøk: hvilke dager og tidspunkter gir medvind
//! på kjente klatresegmenter.

pub mod analyze;
pub mod catalog;
pub mod compass;
pub mod config;
pub mod error;
pub mod favorability;
pub mod metrics;
pub mod models;
pub mod report;
pub mod selector;
pub mod sky;
pub mod types;
pub mod units;
pub mod weather;
pub mod weather_api;

pub use analyze::{analyze_segments, horizon_for, AnalyzeInputs};
pub use catalog::{read_catalog, read_catalog_from_reader, Catalog};
pub use config::{load_config, save_config, ForecastConfig, Thresholds};
pub use error::{CatalogError, ConfigError, FetchError, FetchSource, RecordError};
pub use favorability::{evaluate, Evaluation, FavorabilityResult, Horizon, SkipReason};
pub use metrics::Metrics;
pub use models::{DayWindow, DaylightCalendar, Location, Segment, WeatherSample};
pub use report::render_report;
pub use selector::select;
pub use types::{DayReport, RankedReport, SegmentReport, SegmentStatus};
pub use units::Units;
pub use weather::{fetch_forecast, ForecastData, StaticWeatherProvider, WeatherProvider};
