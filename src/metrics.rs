// src/metrics.rs
use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub const ASSEMBLED_TOTAL: &str = "jobfeed_assembled_total";
pub const FEED_KEPT_TOTAL: &str = "jobfeed_feed_kept_total";
pub const FEED_INELIGIBLE_TOTAL: &str = "jobfeed_feed_ineligible_total";
pub const FEED_FILTERED_TOTAL: &str = "jobfeed_feed_filtered_total";
pub const RULES_RELOAD_TOTAL: &str = "jobfeed_rules_reload_total";
pub const FEED_BUILD_MS: &str = "jobfeed_feed_build_ms";

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(ASSEMBLED_TOTAL, "Messages assembled via /assemble.");
        describe_counter!(FEED_KEPT_TOTAL, "Postings kept by feed builds.");
        describe_counter!(
            FEED_INELIGIBLE_TOTAL,
            "Messages dropped by the eligibility gate."
        );
        describe_counter!(
            FEED_FILTERED_TOTAL,
            "Messages dropped by score floor or location/skill/experience filters."
        );
        describe_counter!(RULES_RELOAD_TOTAL, "Rules reload attempts by outcome.");
        describe_histogram!(FEED_BUILD_MS, "Feed build time in milliseconds.");
    });
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Call once per process.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        ensure_metrics_described();
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
