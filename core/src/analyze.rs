// core/src/analyze.rs
use chrono::DateTime;
use chrono_tz::Tz;
use log::{debug, info};

use crate::config::ForecastConfig;
use crate::favorability::{evaluate, Evaluation, Horizon};
use crate::metrics::{
    samples_evaluated_total, samples_qualified_total, samples_skipped_total, Metrics,
};
use crate::models::Segment;
use crate::selector::select;
use crate::types::{RankedReport, SegmentReport};
use crate::weather::ForecastData;

/// Horisonten for en kjøring startet `as_of`.
pub fn horizon_for(config: &ForecastConfig, as_of: DateTime<Tz>) -> Horizon {
    if config.skip_today {
        Horizon::from_tomorrow(as_of, config.horizon_days)
    } else {
        Horizon::from(as_of, config.horizon_days)
    }
}

#[derive(Clone, Copy)]
pub struct AnalyzeInputs<'a> {
    pub segments: &'a [Segment],
    pub forecast: &'a ForecastData,
    pub config: &'a ForecastConfig,
    /// Tidspunktet kjøringen regnes fra (lokal tid)
    pub as_of: DateTime<Tz>,
    /// Tellere (valgfritt)
    pub metrics: Option<&'a Metrics>,
}

/// Segment × prognosepunkt → motor → velger → rapport.
pub fn analyze_segments<'a>(inputs: AnalyzeInputs<'a>) -> RankedReport<'a> {
    let config = inputs.config;
    let thresholds = &config.thresholds;
    let horizon = horizon_for(config, inputs.as_of);
    let daylight = &inputs.forecast.daylight;

    debug!("horizon {} .. {}", horizon.start, horizon.end);

    let mut segments = Vec::with_capacity(inputs.segments.len());
    let (mut scored, mut skipped, mut qualified) = (0u64, 0u64, 0u64);

    for segment in inputs.segments {
        if segment.kom_held() && !config.include_held_koms {
            debug!("{}: KOM already held, not scored", segment.name);
            segments.push(SegmentReport::held(segment));
            continue;
        }

        let mut results = Vec::with_capacity(inputs.forecast.samples.len());
        for sample in &inputs.forecast.samples {
            match evaluate(segment, sample, daylight, &horizon, thresholds) {
                Evaluation::Scored(r) => {
                    scored += 1;
                    if r.qualifies {
                        qualified += 1;
                    }
                    results.push(r);
                }
                Evaluation::Skipped(reason) => {
                    skipped += 1;
                    if let Some(m) = inputs.metrics {
                        samples_skipped_total(m, reason.as_str()).inc();
                    }
                }
            }
        }

        let report = select(segment, &results, daylight);
        debug!(
            "{}: {} qualifying samples over {} days",
            segment.name,
            report.qualifying_count(),
            report.days.len()
        );
        segments.push(report);
    }

    if let Some(m) = inputs.metrics {
        samples_evaluated_total(m).inc_by(scored);
        samples_qualified_total(m).inc_by(qualified);
    }
    info!(
        "analyzed {} segments: {} pairs scored, {} skipped, {} qualifying",
        inputs.segments.len(),
        scored,
        skipped,
        qualified
    );

    RankedReport {
        generated_at: inputs.as_of,
        thresholds: *thresholds,
        units: config.units,
        segments,
    }
}
