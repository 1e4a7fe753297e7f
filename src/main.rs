//! Job feed service: binary entrypoint.
//! Boots the Axum HTTP server with the active rules and a Prometheus endpoint.

use jobfeed_engine::api::{self, AppState};
use jobfeed_engine::metrics::Metrics;
use jobfeed_engine::telemetry;
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    telemetry::init_dev_tracing();

    let state = AppState::from_env()?;
    let metrics = Metrics::init()?;
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
