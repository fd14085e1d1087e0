// core/src/catalog.rs
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::compass::parse_direction;
use crate::error::{CatalogError, RecordError};
use crate::models::Segment;
use crate::units::{parse_distance_km, parse_elapsed_secs};

/// Kolonner som må finnes i headeren.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Segment name",
    "Distance",
    "Direction",
    "KOM holder",
    "KOM Time",
    "My Rank",
    "My Time",
];

/// Rå rad slik den står i CSV-en, før validering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Segment name")]
    pub segment_name: Option<String>,
    #[serde(rename = "Distance")]
    pub distance: Option<String>,
    #[serde(rename = "Climb", default)]
    pub climb: Option<String>,
    #[serde(rename = "Direction")]
    pub direction: Option<String>,
    #[serde(rename = "KOM holder")]
    pub kom_holder: Option<String>,
    #[serde(rename = "KOM Time")]
    pub kom_time: Option<String>,
    #[serde(rename = "My Rank")]
    pub my_rank: Option<String>,
    #[serde(rename = "My Time")]
    pub my_time: Option<String>,
}

/// En forkastet rad (linjenummer i filen + grunn).
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub line: u64,
    pub segment_name: Option<String>,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub segments: Vec<Segment>,
    pub rejected: Vec<RejectedRow>,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, RecordError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RecordError::MissingField(field)),
    }
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn elapsed(value: &Option<String>, field: &'static str) -> Result<u32, RecordError> {
    let raw = required(value, field)?;
    parse_elapsed_secs(raw).ok_or_else(|| RecordError::InvalidDuration {
        field,
        value: raw.to_string(),
    })
}

/// Validerer og konverterer én rad til et typet `Segment`.
pub fn parse_record(raw: &RawRecord) -> Result<Segment, RecordError> {
    let name = required(&raw.segment_name, "Segment name")?;

    let distance_label = required(&raw.distance, "Distance")?;
    let distance_km = parse_distance_km(distance_label).ok_or_else(|| RecordError::InvalidNumber {
        field: "Distance",
        value: distance_label.to_string(),
    })?;

    let direction_label = required(&raw.direction, "Direction")?;
    let direction_deg = parse_direction(direction_label)
        .ok_or_else(|| RecordError::InvalidDirection(direction_label.to_string()))?;

    let kom_holder = required(&raw.kom_holder, "KOM holder")?;
    let kom_time_secs = elapsed(&raw.kom_time, "KOM Time")?;

    // "3" eller "3/120"
    let rank_raw = required(&raw.my_rank, "My Rank")?;
    let my_rank = rank_raw
        .split('/')
        .next()
        .and_then(|r| r.trim().parse::<u32>().ok())
        .filter(|r| *r > 0)
        .ok_or_else(|| RecordError::InvalidNumber {
            field: "My Rank",
            value: rank_raw.to_string(),
        })?;
    let my_time_secs = elapsed(&raw.my_time, "My Time")?;

    Ok(Segment {
        name: name.to_string(),
        distance_km,
        distance_label: distance_label.to_string(),
        climb: optional(&raw.climb).unwrap_or_default().to_string(),
        direction_deg,
        direction_label: direction_label.to_string(),
        kom_holder: kom_holder.to_string(),
        kom_time_secs,
        my_rank,
        my_time_secs,
    })
}

/// Leser KOM-listen fra fil. Ugyldige rader forkastes med advarsel.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Open {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    let catalog = read_catalog_from_reader(file, path)?;
    info!(
        "catalog {}: {} segments loaded, {} rows rejected",
        path.display(),
        catalog.segments.len(),
        catalog.rejected.len()
    );
    Ok(catalog)
}

/// Som `read_catalog`, men fra en vilkårlig leser (`origin` brukes i feilmeldinger).
pub fn read_catalog_from_reader<R: io::Read>(
    reader: R,
    origin: &Path,
) -> Result<Catalog, CatalogError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(CatalogError::MissingHeader {
            path: origin.to_path_buf(),
        });
    }
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn {
                path: origin.to_path_buf(),
                column,
            });
        }
    }

    let mut catalog = Catalog::default();
    for result in rdr.records() {
        let (line, parsed) = match result {
            Ok(record) => {
                // hopp over helt tomme linjer
                if record.iter().all(str::is_empty) {
                    continue;
                }
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                let parsed = match record.deserialize::<RawRecord>(Some(&headers)) {
                    Ok(raw) => parse_record(&raw)
                        .map_err(|e| (e, optional(&raw.segment_name).map(str::to_string))),
                    Err(e) => Err((RecordError::Malformed(e.to_string()), None)),
                };
                (line, parsed)
            }
            // I/O er fatalt, ellers gjelder feilen bare denne raden (f.eks. ikke-UTF-8)
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                (line, Err((RecordError::Malformed(e.to_string()), None)))
            }
        };

        match parsed {
            Ok(segment) => catalog.segments.push(segment),
            Err((error, segment_name)) => {
                warn!(
                    "catalog {} line {}: rejected {}: {}",
                    origin.display(),
                    line,
                    segment_name.as_deref().unwrap_or("<unnamed>"),
                    error
                );
                catalog.rejected.push(RejectedRow {
                    line,
                    segment_name,
                    error,
                });
            }
        }
    }

    Ok(catalog)
}
