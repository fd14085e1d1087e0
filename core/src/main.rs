// core/src/main.rs
use std::env;

use anyhow::Context;
use chrono::Utc;
use log::{debug, warn};

use komcast_core::metrics::catalog_rows_rejected_total;
use komcast_core::report::print_report;
use komcast_core::weather_api::LiveWeatherProvider;
use komcast_core::{
    analyze_segments, fetch_forecast, horizon_for, load_config, read_catalog, AnalyzeInputs,
    Metrics,
};

const CONFIG_ENV: &str = "KOMCAST_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "komcast.json";

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&config_path).with_context(|| format!("loading {config_path}"))?;
    let tz = config.tz()?;
    let metrics = Metrics::new().context("setting up metrics")?;

    let catalog = read_catalog(&config.catalog_path)
        .with_context(|| format!("reading catalog {}", config.catalog_path.display()))?;
    catalog_rows_rejected_total(&metrics).inc_by(catalog.rejected.len() as u64);
    if catalog.segments.is_empty() {
        warn!("catalog has no usable segments");
    }

    let provider = LiveWeatherProvider::from_env(&config)?;
    let as_of = Utc::now().with_timezone(&tz);
    let horizon = horizon_for(&config, as_of);
    let forecast = fetch_forecast(&provider, &config.location, tz, &horizon, Some(&metrics))
        .context("fetching weather data")?;

    let report = analyze_segments(AnalyzeInputs {
        segments: &catalog.segments,
        forecast: &forecast,
        config: &config,
        as_of,
        metrics: Some(&metrics),
    });
    print_report(&report, &config);

    match metrics.render() {
        Ok(text) => debug!("metrics:\n{text}"),
        Err(e) => debug!("could not render metrics: {e}"),
    }
    Ok(())
}
