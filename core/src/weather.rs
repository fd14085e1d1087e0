// core/src/weather.rs
use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;
use log::{debug, info, warn};

use crate::error::{FetchError, FetchSource};
use crate::favorability::Horizon;
use crate::metrics::{fetch_total, Metrics};
use crate::models::{DayWindow, DaylightCalendar, Location, WeatherSample};

/// Kilde for prognose og soltider (prod: `LiveWeatherProvider`, test: `StaticWeatherProvider`).
///
/// Kontrakt: enten kommer hele datasettet, eller en feil. Aldri halve svar.
pub trait WeatherProvider {
    /// Prognosepunkter i tidsrekkefølge, tidsstempler i `tz`.
    fn forecast_samples(&self, location: &Location, tz: Tz)
        -> Result<Vec<WeatherSample>, FetchError>;

    /// Soloppgang/solnedgang for `days` dager fra og med `start`.
    fn daylight_windows(
        &self,
        location: &Location,
        tz: Tz,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<DayWindow>, FetchError>;
}

/// Fast datasett – for tester og offline-kjøring.
#[derive(Debug, Clone, Default)]
pub struct StaticWeatherProvider {
    pub samples: Vec<WeatherSample>,
    pub windows: Vec<DayWindow>,
}

impl WeatherProvider for StaticWeatherProvider {
    fn forecast_samples(
        &self,
        _location: &Location,
        _tz: Tz,
    ) -> Result<Vec<WeatherSample>, FetchError> {
        Ok(self.samples.clone())
    }

    fn daylight_windows(
        &self,
        _location: &Location,
        _tz: Tz,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<DayWindow>, FetchError> {
        let end = start + chrono::Days::new(days as u64);
        Ok(self
            .windows
            .iter()
            .filter(|w| w.date() >= start && w.date() < end)
            .cloned()
            .collect())
    }
}

/// Alt kjernen trenger fra værkildene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastData {
    pub samples: Vec<WeatherSample>,
    pub daylight: DaylightCalendar,
}

/// Antall kalenderdager horisonten berører.
pub fn horizon_days_spanned(horizon: &Horizon) -> u32 {
    let first = horizon.start.date_naive();
    let mut last = horizon.end.date_naive();
    if horizon.end.num_seconds_from_midnight() == 0 && last > first {
        last = last.pred_opt().unwrap_or(last);
    }
    ((last - first).num_days().max(0) + 1) as u32
}

fn record<T>(
    metrics: Option<&Metrics>,
    which: FetchSource,
    result: &Result<T, FetchError>,
) {
    if let Some(m) = metrics {
        let outcome = if result.is_ok() { "ok" } else { "error" };
        fetch_total(m, which.as_str(), outcome).inc();
    }
}

/// Henter prognose og soltider sekvensielt. Første feil avbryter.
pub fn fetch_forecast(
    provider: &dyn WeatherProvider,
    location: &Location,
    tz: Tz,
    horizon: &Horizon,
    metrics: Option<&Metrics>,
) -> Result<ForecastData, FetchError> {
    let result = provider.forecast_samples(location, tz);
    record(metrics, FetchSource::Forecast, &result);
    let mut samples = result?;
    samples.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let start = horizon.start.date_naive();
    let days = horizon_days_spanned(horizon);
    let result = provider.daylight_windows(location, tz, start, days);
    record(metrics, FetchSource::Daylight, &result);
    let windows = result?;
    for w in &windows {
        debug!("daylight {}: {} - {}", w.date(), w.sunrise(), w.sunset());
    }
    let daylight = DaylightCalendar::new(windows);
    if daylight.is_empty() {
        warn!("no daylight windows from {start}, every sample will be skipped");
    }

    info!(
        "forecast: {} samples, {} daylight windows from {}",
        samples.len(),
        daylight.len(),
        start
    );

    Ok(ForecastData { samples, daylight })
}
