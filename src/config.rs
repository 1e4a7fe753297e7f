// src/config.rs
//! Classification rules: eligibility phrases, location keywords, feed limits.
//!
//! Loaded from TOML (`config/rules.toml` or `$JOBFEED_RULES_PATH`); every field
//! has a built-in default so a partial file is fine.

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::location::{
    LocationBucket, INTERNATIONAL_KEYWORDS, PAN_INDIA_KEYWORDS, PAN_INDIA_PHRASES,
    REMOTE_KEYWORDS,
};

// --- env defaults & names ---
pub const DEFAULT_RULES_PATH: &str = "config/rules.toml";
pub const DEFAULT_MIN_WORDS: usize = 12;
pub const DEFAULT_FRESHER_LIMIT: usize = 100;
pub const DEFAULT_BEST_MIN_SCORE: u32 = 60;
pub const DEFAULT_BEST_LIMIT: usize = 50;
pub const DEFAULT_CONTACT_PHRASES: &[&str] = &["apply", "send resume", "email"];

pub const ENV_RULES_PATH: &str = "JOBFEED_RULES_PATH";
pub const ENV_MIN_WORDS: &str = "JOBFEED_MIN_WORDS";

static BUILTIN: Lazy<Rules> = Lazy::new(Rules::default);

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    /// A message must have strictly more whitespace-delimited tokens than this.
    pub min_words: usize,
    pub contact_phrases: Vec<String>,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            contact_phrases: owned(DEFAULT_CONTACT_PHRASES),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRules {
    /// Explicit nationwide phrases; only consulted for the single label.
    pub pan_india_phrases: Vec<String>,
    pub pan_india: Vec<String>,
    pub remote: Vec<String>,
    pub international: Vec<String>,
}

impl Default for LocationRules {
    fn default() -> Self {
        Self {
            pan_india_phrases: owned(PAN_INDIA_PHRASES),
            pan_india: owned(PAN_INDIA_KEYWORDS),
            remote: owned(REMOTE_KEYWORDS),
            international: owned(INTERNATIONAL_KEYWORDS),
        }
    }
}

impl LocationRules {
    /// Keywords for `bucket`; `Unspecified` has none.
    pub fn keywords(&self, bucket: LocationBucket) -> &[String] {
        match bucket {
            LocationBucket::PanIndia => &self.pan_india,
            LocationBucket::Remote => &self.remote,
            LocationBucket::International => &self.international,
            LocationBucket::Unspecified => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedRules {
    /// Default cap for the fresher-analysis view.
    pub fresher_limit: usize,
    /// Best-jobs view keeps scores at or above this.
    pub best_min_score: u32,
    /// Default cap for the best-jobs view.
    pub best_limit: usize,
}

impl Default for FeedRules {
    fn default() -> Self {
        Self {
            fresher_limit: DEFAULT_FRESHER_LIMIT,
            best_min_score: DEFAULT_BEST_MIN_SCORE,
            best_limit: DEFAULT_BEST_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub eligibility: EligibilityRules,
    pub location: LocationRules,
    pub feed: FeedRules,
}

impl Rules {
    /// Built-in defaults, shared.
    pub fn builtin() -> &'static Rules {
        &BUILTIN
    }

    /// Parse rules from a TOML string. Keyword and phrase entries are trimmed
    /// and lower-cased; empty entries are dropped.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let mut rules: Rules = toml::from_str(toml_str).context("invalid rules TOML")?;
        rules.normalize();
        Ok(rules)
    }

    /// Read rules from `path` and apply env overrides. The file must exist.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules config at {}", path.display()))?;
        let mut rules = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse rules config at {}", path.display()))?;
        rules.apply_env_overrides();
        Ok(rules)
    }

    /// Load rules for the running service.
    ///
    /// `$JOBFEED_RULES_PATH` must point at a readable file when set. Without it,
    /// `config/rules.toml` is used if present, else the built-in defaults.
    pub fn from_toml() -> anyhow::Result<Self> {
        match resolve_path() {
            (path, true) => Self::from_path(&path),
            (path, false) if path.exists() => Self::from_path(&path),
            (path, false) => {
                info!(
                    target: "jobfeed",
                    path = %path.display(),
                    "rules file not found; using built-in rules"
                );
                let mut rules = Self::default();
                rules.apply_env_overrides();
                Ok(rules)
            }
        }
    }

    fn normalize(&mut self) {
        for list in [
            &mut self.eligibility.contact_phrases,
            &mut self.location.pan_india_phrases,
            &mut self.location.pan_india,
            &mut self.location.remote,
            &mut self.location.international,
        ] {
            *list = list
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(n) = parse_min_words_env(std::env::var(ENV_MIN_WORDS).ok()) {
            self.eligibility.min_words = n;
        }
    }
}

/// Rules path and whether it came from the environment.
pub fn resolve_path() -> (PathBuf, bool) {
    match std::env::var(ENV_RULES_PATH) {
        Ok(p) if !p.trim().is_empty() => (PathBuf::from(p.trim()), true),
        _ => (PathBuf::from(DEFAULT_RULES_PATH), false),
    }
}

// non-numeric values are ignored
fn parse_min_words_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}
