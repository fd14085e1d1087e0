// core/src/weather_api.rs
use std::time::Duration;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::info;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use ureq::Agent;

use crate::config::{ForecastConfig, API_KEY_ENV};
use crate::error::{DaylightError, FetchError, FetchSource};
use crate::models::{DayWindow, Location, WeatherSample};
use crate::units::Units;
use crate::weather::WeatherProvider;

pub const OPENWEATHER_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
pub const SUNRISE_SUNSET_URL: &str = "https://api.sunrisesunset.io/json";

// ---------- OpenWeatherMap 5 dager / 3 timer ----------

#[derive(Debug, Clone, Deserialize)]
struct OwmForecastResp {
    #[serde(default)]
    list: Vec<OwmPeriod>,
}

#[derive(Debug, Clone, Deserialize)]
struct OwmPeriod {
    dt: i64,
    main: OwmMain,
    wind: OwmWind,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Clone, Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct OwmWind {
    speed: f64,
    deg: f64,
    #[serde(default)]
    gust: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct OwmCondition {
    #[serde(default)]
    icon: String,
}

// ---------- sunrisesunset.io ----------

#[derive(Debug, Clone, Deserialize)]
struct SunStatus {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SunResp {
    results: Vec<SunResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct SunResult {
    date: String,
    sunrise: String,
    sunset: String,
}

/// JSON → T med sti til feltet som feilet.
fn parse_json<T: DeserializeOwned>(which: FetchSource, text: &str) -> Result<T, FetchError> {
    let de = &mut serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(de).map_err(|e| FetchError::Payload {
        which,
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

fn get_text(request: ureq::Request, which: FetchSource) -> Result<String, FetchError> {
    match request.call() {
        Ok(resp) => resp.into_string().map_err(|e| FetchError::Transport {
            which,
            message: e.to_string(),
        }),
        Err(ureq::Error::Status(status, _)) => Err(FetchError::Status { which, status }),
        Err(ureq::Error::Transport(t)) => Err(FetchError::Transport {
            which,
            message: t.to_string(),
        }),
    }
}

fn build_agent(timeout: Duration) -> Agent {
    // ureq bruker rustls når "tls" er aktivert
    ureq::AgentBuilder::new().timeout(timeout).build()
}

/// OpenWeatherMap-svar → prognosepunkter i `tz`, sortert på tid.
pub fn parse_forecast_payload(text: &str, tz: Tz) -> Result<Vec<WeatherSample>, FetchError> {
    let which = FetchSource::Forecast;
    let body: OwmForecastResp = parse_json(which, text)?;

    let mut samples = Vec::with_capacity(body.list.len());
    for (i, period) in body.list.into_iter().enumerate() {
        let timestamp = Utc
            .timestamp_opt(period.dt, 0)
            .single()
            .ok_or_else(|| FetchError::Payload {
                which,
                path: format!("list[{i}].dt"),
                message: format!("invalid unix timestamp {}", period.dt),
            })?
            .with_timezone(&tz);

        if !(period.wind.speed.is_finite() && period.wind.speed >= 0.0) {
            return Err(FetchError::Payload {
                which,
                path: format!("list[{i}].wind.speed"),
                message: format!("invalid wind speed {}", period.wind.speed),
            });
        }
        if !period.wind.deg.is_finite() {
            return Err(FetchError::Payload {
                which,
                path: format!("list[{i}].wind.deg"),
                message: format!("invalid wind direction {}", period.wind.deg),
            });
        }

        samples.push(WeatherSample {
            timestamp,
            wind_speed: period.wind.speed,
            wind_deg: crate::compass::norm_deg(period.wind.deg),
            wind_gust: period.wind.gust,
            temperature: period.main.temp,
            sky_code: period
                .weather
                .into_iter()
                .next()
                .map(|c| c.icon)
                .unwrap_or_default(),
        });
    }
    samples.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    Ok(samples)
}

fn local_instant(tz: Tz, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Tz>, DaylightError> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| DaylightError::NonexistentLocalTime(naive.to_string()))
}

fn parse_clock(field: &'static str, value: &str) -> Result<NaiveTime, DaylightError> {
    NaiveTime::parse_from_str(value.trim(), "%I:%M:%S %p").map_err(|_| {
        DaylightError::Unparseable {
            field,
            value: value.to_string(),
        }
    })
}

/// Ett resultat fra sunrisesunset.io (lokale klokkeslett i `tz`) → dagsvindu.
/// Solnedgang som havner før soloppgang flyttes eksplisitt til neste dag.
fn day_window_from(tz: Tz, r: &SunResult) -> Result<DayWindow, DaylightError> {
    let date = NaiveDate::parse_from_str(r.date.trim(), "%Y-%m-%d").map_err(|_| {
        DaylightError::Unparseable {
            field: "date",
            value: r.date.clone(),
        }
    })?;
    let sunrise = local_instant(tz, date, parse_clock("sunrise", &r.sunrise)?)?;
    let mut sunset = local_instant(tz, date, parse_clock("sunset", &r.sunset)?)?;
    if sunset <= sunrise {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DaylightError::Unparseable {
                field: "date",
                value: r.date.clone(),
            })?;
        sunset = local_instant(tz, next, parse_clock("sunset", &r.sunset)?)?;
    }
    DayWindow::new(date, sunrise, sunset)
}

/// sunrisesunset.io-svar → dagsvinduer.
pub fn parse_daylight_payload(text: &str, tz: Tz) -> Result<Vec<DayWindow>, FetchError> {
    let which = FetchSource::Daylight;
    let status: SunStatus = parse_json(which, text)?;
    match status.status.as_deref() {
        Some("OK") => {}
        other => {
            return Err(FetchError::Api {
                which,
                status: other.unwrap_or("<missing>").to_string(),
            })
        }
    }

    let body: SunResp = parse_json(which, text)?;
    body.results
        .iter()
        .map(|r| day_window_from(tz, r).map_err(FetchError::from))
        .collect()
}

/// OpenWeatherMap-klient – enkel blocking-versjon (ureq)
pub struct OpenWeatherClient {
    agent: Agent,
    base_url: String,
    api_key: String,
    units: Units,
    steps: u32,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, units: Units, steps: u32, timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            base_url: OPENWEATHER_FORECAST_URL.to_string(),
            api_key: api_key.into(),
            units,
            steps,
        }
    }

    /// Nøkkel fra `OPENWEATHER_API_KEY`, resten fra konfig.
    pub fn from_env(config: &ForecastConfig) -> Result<Self, FetchError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(FetchError::MissingApiKey(API_KEY_ENV))?;
        Ok(Self::new(
            api_key,
            config.units,
            config.forecast_steps,
            Duration::from_secs(config.request_timeout_secs),
        ))
    }

    pub fn fetch(&self, location: &Location, tz: Tz) -> Result<Vec<WeatherSample>, FetchError> {
        info!(
            "[OpenWeather] GET {} lat={:.4} lon={:.4} cnt={} units={}",
            self.base_url,
            location.lat,
            location.lon,
            self.steps,
            self.units.api_param()
        );
        let request = self
            .agent
            .get(&self.base_url)
            .query("lat", &location.lat.to_string())
            .query("lon", &location.lon.to_string())
            .query("cnt", &self.steps.to_string())
            .query("units", self.units.api_param())
            .query("appid", &self.api_key);
        let text = get_text(request, FetchSource::Forecast)?;
        parse_forecast_payload(&text, tz)
    }
}

/// Klient for soloppgang/solnedgang (sunrisesunset.io).
pub struct SunriseSunsetClient {
    agent: Agent,
    base_url: String,
}

impl SunriseSunsetClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: build_agent(timeout),
            base_url: SUNRISE_SUNSET_URL.to_string(),
        }
    }

    pub fn fetch(
        &self,
        location: &Location,
        tz: Tz,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<DayWindow>, FetchError> {
        let end = start + Days::new(days.saturating_sub(1) as u64);
        info!(
            "[SunriseSunset] GET {} lat={:.4} lon={:.4} {}..={}",
            self.base_url, location.lat, location.lon, start, end
        );
        // be om lokale klokkeslett direkte, så slipper vi UTC-dato-forskyvning
        let request = self
            .agent
            .get(&self.base_url)
            .query("lat", &location.lat.to_string())
            .query("lng", &location.lon.to_string())
            .query("timezone", tz.name())
            .query("date_start", &start.format("%Y-%m-%d").to_string())
            .query("date_end", &end.format("%Y-%m-%d").to_string());
        let text = get_text(request, FetchSource::Daylight)?;
        parse_daylight_payload(&text, tz)
    }
}

/// Produksjonskilden: OpenWeatherMap + sunrisesunset.io.
pub struct LiveWeatherProvider {
    pub forecast: OpenWeatherClient,
    pub daylight: SunriseSunsetClient,
}

impl LiveWeatherProvider {
    pub fn from_env(config: &ForecastConfig) -> Result<Self, FetchError> {
        Ok(Self {
            forecast: OpenWeatherClient::from_env(config)?,
            daylight: SunriseSunsetClient::new(Duration::from_secs(config.request_timeout_secs)),
        })
    }
}

impl WeatherProvider for LiveWeatherProvider {
    fn forecast_samples(
        &self,
        location: &Location,
        tz: Tz,
    ) -> Result<Vec<WeatherSample>, FetchError> {
        self.forecast.fetch(location, tz)
    }

    fn daylight_windows(
        &self,
        location: &Location,
        tz: Tz,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<DayWindow>, FetchError> {
        self.daylight.fetch(location, tz, start, days)
    }
}
