// core/src/types.rs
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::config::Thresholds;
use crate::favorability::FavorabilityResult;
use crate::models::{DayWindow, Segment};
use crate::units::Units;

/// Status for ett segment i rapporten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStatus {
    /// Minst én gunstig dag
    Favorable,
    /// Ingen gunstige punkter i horisonten – vises likevel
    NoFavorableWindow,
    /// Rytteren har allerede KOM-en (ikke vurdert)
    KomHeld,
}

/// Én dag med gunstige punkter, i tidsrekkefølge.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport<'a> {
    pub date: NaiveDate,
    pub window: Option<&'a DayWindow>,
    pub samples: Vec<FavorabilityResult<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentReport<'a> {
    pub segment: &'a Segment,
    pub status: SegmentStatus,
    /// Kronologisk, tidligste mulighet først
    pub days: Vec<DayReport<'a>>,
    /// Høyeste gunstighet (lik: sterkest vind, så tidligst)
    pub best: Option<FavorabilityResult<'a>>,
}

impl<'a> SegmentReport<'a> {
    pub fn held(segment: &'a Segment) -> Self {
        Self {
            segment,
            status: SegmentStatus::KomHeld,
            days: Vec::new(),
            best: None,
        }
    }

    pub fn qualifying_count(&self) -> usize {
        self.days.iter().map(|d| d.samples.len()).sum()
    }
}

/// Ferdig rangert resultat, klart for visning.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedReport<'a> {
    pub generated_at: DateTime<Tz>,
    pub thresholds: Thresholds,
    pub units: Units,
    pub segments: Vec<SegmentReport<'a>>,
}

impl<'a> RankedReport<'a> {
    pub fn favorable_segments(&self) -> impl Iterator<Item = &SegmentReport<'a>> {
        self.segments
            .iter()
            .filter(|s| s.status == SegmentStatus::Favorable)
    }
}
