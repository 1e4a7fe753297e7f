// src/wire.rs
//! Field-mapping adapter between collector/dashboard JSON and `RawMessage`.
//!
//! Endpoints disagree on field names (`message` vs `message_text`,
//! `keywords` vs `keywords_found`, ...). Each spelling gets its own optional
//! field so payloads carrying several spellings still deserialize; `into_raw`
//! picks the first non-blank value in a fixed order.

use serde::Deserialize;
use tracing::debug;

use crate::model::{JobType, RawMessage};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireMessage {
    pub text: Option<String>,
    pub message: Option<String>,
    pub message_text: Option<String>,

    pub group: Option<String>,
    pub group_name: Option<String>,

    pub date: Option<String>,

    pub skills: Option<String>,
    pub keywords: Option<String>,
    pub keywords_found: Option<String>,

    pub location: Option<String>,
    pub job_type: Option<String>,
    pub company: Option<String>,
    pub apply_link: Option<String>,

    pub experience_level: Option<String>,
    pub experience_required: Option<String>,
    pub experience: Option<String>,

    /// Some feeds send fractional scores; rounded and clamped at zero.
    pub score: Option<f64>,
}

/// First non-blank candidate, trimmed.
fn first_non_blank<const N: usize>(candidates: [&Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl WireMessage {
    pub fn into_raw(self) -> RawMessage {
        let job_type = self.job_type.as_deref().and_then(|s| {
            if s.trim().is_empty() {
                return None;
            }
            match s.parse::<JobType>() {
                Ok(t) => Some(t),
                Err(e) => {
                    debug!(target: "jobfeed", error = %e, "ignoring job_type");
                    None
                }
            }
        });

        RawMessage {
            // message text keeps its inner whitespace; only presence is coalesced
            text: [&self.text, &self.message, &self.message_text]
                .into_iter()
                .flatten()
                .find(|s| !s.trim().is_empty())
                .cloned()
                .unwrap_or_default(),
            group: first_non_blank([&self.group, &self.group_name]).unwrap_or_default(),
            date: first_non_blank([&self.date]).unwrap_or_default(),
            skills_field: first_non_blank([&self.skills, &self.keywords, &self.keywords_found]),
            location_field: first_non_blank([&self.location]),
            job_type,
            company: first_non_blank([&self.company]),
            apply_link: first_non_blank([&self.apply_link]),
            experience: first_non_blank([
                &self.experience_level,
                &self.experience_required,
                &self.experience,
            ]),
            score: self
                .score
                .filter(|s| s.is_finite())
                .map(|s| s.round().max(0.0) as u32),
        }
    }
}

impl From<WireMessage> for RawMessage {
    fn from(w: WireMessage) -> Self {
        w.into_raw()
    }
}
