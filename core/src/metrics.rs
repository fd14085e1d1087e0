// core/src/metrics.rs
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Tellere for én kjøring. Eies av kaller, ingen globale registre.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    rows_rejected: IntCounter,
    samples_evaluated: IntCounter,
    samples_skipped: IntCounterVec,
    samples_qualified: IntCounter,
    fetches: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let rows_rejected = IntCounter::new(
            "komcast_catalog_rows_rejected_total",
            "Catalog rows rejected during parsing",
        )?;
        let samples_evaluated = IntCounter::new(
            "komcast_samples_evaluated_total",
            "Segment x sample pairs scored",
        )?;
        let samples_skipped = IntCounterVec::new(
            Opts::new(
                "komcast_samples_skipped_total",
                "Segment x sample pairs skipped before scoring",
            ),
            &["reason"],
        )?;
        let samples_qualified = IntCounter::new(
            "komcast_samples_qualified_total",
            "Scored pairs passing all thresholds",
        )?;
        let fetches = IntCounterVec::new(
            Opts::new("komcast_fetch_total", "External fetches by source and outcome"),
            &["source", "outcome"],
        )?;

        registry.register(Box::new(rows_rejected.clone()))?;
        registry.register(Box::new(samples_evaluated.clone()))?;
        registry.register(Box::new(samples_skipped.clone()))?;
        registry.register(Box::new(samples_qualified.clone()))?;
        registry.register(Box::new(fetches.clone()))?;

        Ok(Self {
            registry,
            rows_rejected,
            samples_evaluated,
            samples_skipped,
            samples_qualified,
            fetches,
        })
    }

    /// Prometheus tekstformat.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

pub fn catalog_rows_rejected_total(metrics: &Metrics) -> &IntCounter {
    &metrics.rows_rejected
}

pub fn samples_evaluated_total(metrics: &Metrics) -> &IntCounter {
    &metrics.samples_evaluated
}

pub fn samples_skipped_total(metrics: &Metrics, reason: &str) -> IntCounter {
    metrics.samples_skipped.with_label_values(&[reason])
}

pub fn samples_qualified_total(metrics: &Metrics) -> &IntCounter {
    &metrics.samples_qualified
}

pub fn fetch_total(metrics: &Metrics, source: &str, outcome: &str) -> IntCounter {
    metrics.fetches.with_label_values(&[source, outcome])
}
