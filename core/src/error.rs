// core/src/error.rs
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Feil ved lasting/validering av konfigurasjon.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path} at `{json_path}`: {message}")]
    Json {
        path: PathBuf,
        json_path: String,
        message: String,
    },

    #[error("could not serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unknown time zone `{0}`")]
    UnknownTimezone(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fatale feil ved innlesing av KOM-listen (hele filen).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("catalog {path} has no header row")]
    MissingHeader { path: PathBuf },

    #[error("catalog {path} is missing column `{column}`")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("could not read catalog: {0}")]
    Csv(#[from] csv::Error),
}

/// Feil i én enkelt rad – raden forkastes, kjøringen fortsetter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("missing value for `{0}`")]
    MissingField(&'static str),

    #[error("`{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("`{field}` is not an elapsed time: {value:?}")]
    InvalidDuration { field: &'static str, value: String },

    #[error("unknown compass direction {0:?}")]
    InvalidDirection(String),

    #[error("unreadable row: {0}")]
    Malformed(String),
}

/// Hvilken ekstern kilde som feilet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Forecast,
    Daylight,
}

impl FetchSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchSource::Forecast => "forecast",
            FetchSource::Daylight => "sunrise/sunset",
        }
    }
}

impl fmt::Display for FetchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Henting av prognose eller soltider feilet. Alltid fatalt for kjøringen.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{which} request failed: {message}")]
    Transport { which: FetchSource, message: String },

    #[error("{which} API returned HTTP status {status}")]
    Status { which: FetchSource, status: u16 },

    #[error("{which} API returned status {status:?}")]
    Api { which: FetchSource, status: String },

    #[error("{which} payload malformed at `{path}`: {message}")]
    Payload {
        which: FetchSource,
        path: String,
        message: String,
    },

    #[error("sunrise/sunset payload rejected: {0}")]
    Daylight(#[from] DaylightError),

    #[error("environment variable {0} is not set")]
    MissingApiKey(&'static str),
}

/// Ugyldig dagsvindu (soloppgang/solnedgang).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DaylightError {
    #[error("sunrise {sunrise} is not before sunset {sunset} on {date}")]
    Inverted {
        date: chrono::NaiveDate,
        sunrise: String,
        sunset: String,
    },

    #[error("could not parse {field} {value:?}")]
    Unparseable { field: &'static str, value: String },

    #[error("local time {0} does not exist in the configured time zone")]
    NonexistentLocalTime(String),
}
