// src/api.rs
//! HTTP surface over the engine. Handlers are thin: map wire JSON to
//! `RawMessage`, call the core with the current rules, serialize the result.

use std::sync::{Arc, RwLock};
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use metrics::{counter, histogram};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::assemble::{assemble, resolve_apply_link, AssembleOptions, DisplayContext};
use crate::config::Rules;
use crate::feed::{build_feed, FeedQuery};
use crate::link::application_target;
use crate::metrics::{
    ensure_metrics_described, ASSEMBLED_TOTAL, FEED_BUILD_MS, FEED_FILTERED_TOTAL,
    FEED_INELIGIBLE_TOTAL, FEED_KEPT_TOTAL, RULES_RELOAD_TOTAL,
};
use crate::model::RawMessage;
use crate::telemetry::dev_log_feed;
use crate::wire::WireMessage;

type ApiResult = Result<Json<Value>, (StatusCode, String)>;

/// Shared app state: the active rules, swapped wholesale on reload.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RwLock<Rules>>,
}

impl AppState {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules: Arc::new(RwLock::new(rules)),
        }
    }

    /// Load rules from `$JOBFEED_RULES_PATH` / `config/rules.toml` / built-ins.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(Rules::from_toml()?))
    }

    /// Snapshot of the active rules. A poisoned lock still holds a complete value.
    pub fn current_rules(&self) -> Rules {
        match self.rules.read() {
            Ok(r) => r.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace_rules(&self, fresh: Rules) {
        match self.rules.write() {
            Ok(mut w) => *w = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
    }
}

pub fn router(state: AppState) -> Router {
    ensure_metrics_described();
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/assemble", post(assemble_one))
        .route("/feed", post(feed))
        .route("/link", post(link))
        .route("/rules", get(current_rules))
        .route("/admin/reload-rules", get(admin_reload_rules))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn internal(e: serde_json::Error) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("serialize: {e}"))
}

#[derive(Deserialize)]
struct AssembleReq {
    #[serde(default)]
    context: DisplayContext,
    message: WireMessage,
}

async fn assemble_one(State(state): State<AppState>, Json(body): Json<AssembleReq>) -> ApiResult {
    let rules = state.current_rules();
    let raw = body.message.into_raw();
    let posting = assemble(&raw, &AssembleOptions::with_rules(body.context, &rules));
    counter!(ASSEMBLED_TOTAL).increment(1);
    // posting borrows `raw`; serialize before it goes out of scope
    serde_json::to_value(&posting).map(Json).map_err(internal)
}

#[derive(Deserialize)]
struct FeedReq {
    #[serde(flatten)]
    query: FeedQuery,
    #[serde(default)]
    messages: Vec<WireMessage>,
}

async fn feed(State(state): State<AppState>, Json(body): Json<FeedReq>) -> ApiResult {
    let rules = state.current_rules();
    let messages: Vec<RawMessage> = body.messages.into_iter().map(RawMessage::from).collect();

    let started = Instant::now();
    let feed = build_feed(&messages, &body.query, &rules);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    histogram!(FEED_BUILD_MS).record(elapsed_ms);
    counter!(FEED_KEPT_TOTAL).increment(feed.kept as u64);
    counter!(FEED_INELIGIBLE_TOTAL).increment(feed.dropped_ineligible as u64);
    counter!(FEED_FILTERED_TOTAL).increment((feed.dropped_filtered + feed.dropped_low_score) as u64);
    dev_log_feed(body.query.context.as_str(), feed.total, feed.kept, elapsed_ms);

    serde_json::to_value(&feed).map(Json).map_err(internal)
}

#[derive(Deserialize)]
struct LinkReq {
    #[serde(default)]
    text: String,
}

async fn link(Json(body): Json<LinkReq>) -> Json<Value> {
    let raw = RawMessage::new(body.text);
    let target = application_target(&raw.text);
    Json(json!({
        "apply_link": resolve_apply_link(&raw),
        "channel": target.channel,
        "urls": target.urls,
        "emails": target.emails,
    }))
}

async fn current_rules(State(state): State<AppState>) -> Json<Rules> {
    Json(state.current_rules())
}

async fn admin_reload_rules(State(state): State<AppState>) -> String {
    match Rules::from_toml() {
        Ok(fresh) => {
            state.replace_rules(fresh);
            counter!(RULES_RELOAD_TOTAL, "outcome" => "ok").increment(1);
            info!(target: "jobfeed", "rules reloaded");
            "reloaded".to_string()
        }
        Err(e) => {
            counter!(RULES_RELOAD_TOTAL, "outcome" => "error").increment(1);
            warn!(target: "jobfeed", error = %e, "rules reload failed; keeping previous rules");
            format!("failed: {e:#}")
        }
    }
}
