// src/telemetry.rs
//! Dev-only tracing setup and anonymized log helpers.
//!
//! Message text never reaches the logs; messages are identified by a short
//! SHA-256 prefix instead.

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_DEV_LOG: &str = "JOBFEED_DEV_LOG";
const DEFAULT_FILTER: &str = "jobfeed=info,warn";

// Dev logging gate: JOBFEED_DEV_LOG=1 AND dev env (debug or SHUTTLE_ENV in {local,development,dev})
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Install a compact fmt subscriber when dev logging is enabled. No-op otherwise,
/// and a no-op when a global subscriber is already set.
pub fn init_dev_tracing() {
    if !dev_logging_enabled() {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// First 6 bytes of SHA-256 as lowercase hex (12 chars).
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Why a message left a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Ineligible,
    LowScore,
    Location,
    Skill,
    Experience,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::Ineligible => "ineligible",
            DropReason::LowScore => "low_score",
            DropReason::Location => "location",
            DropReason::Skill => "skill",
            DropReason::Experience => "experience",
        }
    }
}

/// Minimal, anonymized dev log for a dropped message.
pub fn dev_log_drop(text: &str, reason: DropReason) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    info!(target: "jobfeed", %id, reason = reason.as_str(), "feed drop");
}

/// Dev log for a completed feed build.
pub fn dev_log_feed(context: &str, total: usize, kept: usize, elapsed_ms: f64) {
    if !dev_logging_enabled() {
        return;
    }
    info!(target: "jobfeed", context, total, kept, elapsed_ms, "feed built");
}
