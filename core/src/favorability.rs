// core/src/favorability.rs
use chrono::{DateTime, Days, TimeZone};
use chrono_tz::Tz;

use crate::compass::{angular_offset, wind_heading};
use crate::config::Thresholds;
use crate::models::{DaylightCalendar, Segment, WeatherSample};

/// Tidsrommet prognosepunkter vurderes innenfor: [start, end).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Horizon {
    /// `days` dager fra `as_of`.
    pub fn from(as_of: DateTime<Tz>, days: u32) -> Self {
        let end = as_of
            .checked_add_days(Days::new(days as u64))
            .unwrap_or(as_of);
        Self { start: as_of, end }
    }

    /// `days` dager fra neste lokale midnatt etter `as_of`.
    pub fn from_tomorrow(as_of: DateTime<Tz>, days: u32) -> Self {
        let tz = as_of.timezone();
        let start = as_of
            .date_naive()
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|naive| tz.from_local_datetime(&naive).earliest())
            .unwrap_or(as_of);
        Self::from(start, days)
    }

    pub fn contains(&self, t: &DateTime<Tz>) -> bool {
        self.start <= *t && *t < self.end
    }
}

/// Hvorfor et prognosepunkt ble hoppet over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Før soloppgang, etter solnedgang eller dato uten soltider
    OutsideDaylight,
    /// Utenfor prognosehorisonten
    BeyondHorizon,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::OutsideDaylight => "outside_daylight",
            SkipReason::BeyondHorizon => "beyond_horizon",
        }
    }
}

/// Segment × prognosepunkt med utledede felt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FavorabilityResult<'a> {
    pub segment: &'a Segment,
    pub sample: &'a WeatherSample,
    /// Avvik mellom kjøreretning og vindens retning (mot), [0, 180]
    pub offset_deg: f64,
    pub favorability_pct: u8,
    pub qualifies: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation<'a> {
    Scored(FavorabilityResult<'a>),
    Skipped(SkipReason),
}

impl<'a> Evaluation<'a> {
    pub fn scored(self) -> Option<FavorabilityResult<'a>> {
        match self {
            Evaluation::Scored(r) => Some(r),
            Evaluation::Skipped(_) => None,
        }
    }
}

/// Avvik mellom segmentets kjøreretning og retningen vinden blåser mot.
/// Liten verdi = vinden skyver bakfra.
pub fn segment_wind_offset(segment_deg: f64, wind_from_deg: f64) -> f64 {
    angular_offset(segment_deg, wind_heading(wind_from_deg))
}

/// Gunstighet i prosent (0–100).
///
/// `base = 1 - offset/180` løftes i `min_speed/speed`: vind over minstefarten
/// flater ut kurven, svakere vind gjør den brattere og skalerer toppen ned.
/// offset 0 gir maks for farten, offset 180 gir alltid 0.
pub fn favorability_pct(offset_deg: f64, wind_speed: f64, min_wind_speed: f64) -> u8 {
    if !(offset_deg.is_finite() && wind_speed.is_finite()) || wind_speed <= 0.0 {
        return 0;
    }
    let offset = offset_deg.clamp(0.0, 180.0);
    if offset >= 180.0 {
        return 0;
    }
    let min_speed = if min_wind_speed > 0.0 { min_wind_speed } else { wind_speed };

    let base = 1.0 - offset / 180.0;
    let exponent = min_speed / wind_speed;
    let speed_factor = (wind_speed / min_speed).min(1.0);
    let pct = 100.0 * base.powf(exponent) * speed_factor;

    pct.clamp(0.0, 100.0).round() as u8
}

/// Alle tre tersklene må holde.
pub fn qualifies(wind_speed: f64, offset_deg: f64, pct: u8, thresholds: &Thresholds) -> bool {
    wind_speed >= thresholds.min_wind_speed
        && offset_deg <= thresholds.direction_tolerance_deg
        && pct >= thresholds.min_favorability_pct
}

/// Vurderer ett prognosepunkt mot ett segment. Ren funksjon.
pub fn evaluate<'a>(
    segment: &'a Segment,
    sample: &'a WeatherSample,
    daylight: &DaylightCalendar,
    horizon: &Horizon,
    thresholds: &Thresholds,
) -> Evaluation<'a> {
    if !horizon.contains(&sample.timestamp) {
        return Evaluation::Skipped(SkipReason::BeyondHorizon);
    }
    if !daylight.is_daylight(&sample.timestamp) {
        return Evaluation::Skipped(SkipReason::OutsideDaylight);
    }

    let offset_deg = segment_wind_offset(segment.direction_deg, sample.wind_deg);
    let pct = favorability_pct(offset_deg, sample.wind_speed, thresholds.min_wind_speed);

    Evaluation::Scored(FavorabilityResult {
        segment,
        sample,
        offset_deg,
        favorability_pct: pct,
        qualifies: qualifies(sample.wind_speed, offset_deg, pct, thresholds),
    })
}
