// src/model.rs
//! Canonical input model shared by every stage of the engine.
//!
//! `RawMessage` is the one shape the core accepts. Feeds that spell fields
//! differently (`message` vs `text`, `keywords` vs `skills`, ...) go through
//! `crate::wire` first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::assemble::format_job_type_label;

/// Sentinel used when neither an explicit company nor a group name is known.
pub const COMPANY_NOT_SPECIFIED: &str = "Company Not Specified";

/// Coarse job category assigned upstream by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Tech,
    NonTech,
    Freelance,
    Fresher,
}

impl JobType {
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Tech => "tech",
            JobType::NonTech => "non_tech",
            JobType::Freelance => "freelance",
            JobType::Fresher => "fresher",
        }
    }

    /// Display label, e.g. `non_tech` -> `Non Tech`.
    pub fn label(self) -> String {
        format_job_type_label(self.as_str())
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    /// Lenient: case-insensitive, accepts `-` or space in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "tech" => Ok(JobType::Tech),
            "non_tech" => Ok(JobType::NonTech),
            "freelance" => Ok(JobType::Freelance),
            "fresher" => Ok(JobType::Fresher),
            other => anyhow::bail!("unknown job type `{other}`"),
        }
    }
}

/// One collected chat message, already mapped onto canonical field names.
///
/// Only `text` is reliably populated; every derived field degrades to
/// empty/absent when the rest is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMessage {
    pub text: String,
    /// Source channel/community name.
    pub group: String,
    /// ISO date or date-like string, kept verbatim.
    pub date: String,
    /// Comma-delimited skills when supplied separately from `text`.
    pub skills_field: Option<String>,
    /// Free-text location hint when supplied separately from `text`.
    pub location_field: Option<String>,
    pub job_type: Option<JobType>,
    pub company: Option<String>,
    /// Pre-computed apply link, if the feed already resolved one.
    pub apply_link: Option<String>,
    /// Free-text experience descriptor (e.g. "0-1 Years").
    pub experience: Option<String>,
    /// Editorial quality score (best-jobs feed only).
    pub score: Option<u32>,
}

impl RawMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_parses_leniently() {
        assert_eq!("Non-Tech".parse::<JobType>().unwrap(), JobType::NonTech);
        assert_eq!(" fresher ".parse::<JobType>().unwrap(), JobType::Fresher);
        assert_eq!("non tech".parse::<JobType>().unwrap(), JobType::NonTech);
        assert!("all".parse::<JobType>().is_err());
    }

    #[test]
    fn job_type_serde_is_snake_case() {
        let s = serde_json::to_string(&JobType::NonTech).unwrap();
        assert_eq!(s, "\"non_tech\"");
        let back: JobType = serde_json::from_str("\"freelance\"").unwrap();
        assert_eq!(back, JobType::Freelance);
    }

    #[test]
    fn missing_fields_default_on_deserialize() {
        let raw: RawMessage = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(raw.text, "hello");
        assert!(raw.group.is_empty());
        assert!(raw.job_type.is_none());
    }
}
