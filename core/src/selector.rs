// core/src/selector.rs
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;

use crate::favorability::FavorabilityResult;
use crate::models::{DaylightCalendar, Segment};
use crate::types::{DayReport, SegmentReport, SegmentStatus};

/// Rangeringsnøkkel for "beste mulighet": prosent, så vind, så tidligst.
fn best_key<'a>(
    r: &FavorabilityResult<'a>,
) -> (u8, OrderedFloat<f64>, Reverse<chrono::DateTime<chrono_tz::Tz>>) {
    (
        r.favorability_pct,
        OrderedFloat(r.sample.wind_speed),
        Reverse(r.sample.timestamp),
    )
}

fn by_timestamp(a: &FavorabilityResult<'_>, b: &FavorabilityResult<'_>) -> Ordering {
    a.sample.timestamp.cmp(&b.sample.timestamp)
}

/// Grupperer kvalifiserte resultater for ett segment per lokal dato.
///
/// Dager uten kvalifiserte punkter utelates. Et segment uten noen
/// gunstige dager får status `NoFavorableWindow` men blir aldri droppet.
pub fn select<'a>(
    segment: &'a Segment,
    results: &[FavorabilityResult<'a>],
    daylight: &'a DaylightCalendar,
) -> SegmentReport<'a> {
    let mut by_day: BTreeMap<NaiveDate, Vec<FavorabilityResult<'a>>> = BTreeMap::new();

    for r in results
        .iter()
        .filter(|r| r.qualifies && std::ptr::eq(r.segment, segment))
    {
        by_day.entry(r.sample.local_date()).or_default().push(*r);
    }

    let days: Vec<DayReport<'a>> = by_day
        .into_iter()
        .map(|(date, mut samples)| {
            samples.sort_by(by_timestamp);
            // punkter etter midnatt kan høre til gårsdagens vindu; siste punkt avgjør
            let window = samples
                .last()
                .and_then(|r| daylight.window_containing(&r.sample.timestamp));
            DayReport {
                date,
                window,
                samples,
            }
        })
        .collect();

    let best = days
        .iter()
        .flat_map(|d| d.samples.iter())
        .max_by_key(|r| best_key(r))
        .copied();

    let status = if days.is_empty() {
        SegmentStatus::NoFavorableWindow
    } else {
        SegmentStatus::Favorable
    };

    SegmentReport {
        segment,
        status,
        days,
        best,
    }
}
