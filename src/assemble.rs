// src/assemble.rs
//! Posting assembler: one `RawMessage` in, one `ClassifiedPosting` out.
//!
//! Pure and stateless. The same input and options always yield equal output;
//! nothing here logs or touches the environment.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::Rules;
use crate::eligibility::is_eligible_with;
use crate::experience::{classify_experience, ExperienceLevel};
use crate::link::{application_target, extract_apply_link, ApplicationChannel, ApplyLink};
use crate::location::{classify_location_with, location_buckets_with, LocationBucket};
use crate::model::{JobType, RawMessage, COMPANY_NOT_SPECIFIED};
use crate::skills::tokenize_skills;

/// Which dashboard view the posting is assembled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayContext {
    /// Scored best-jobs feed; eligibility is not re-checked.
    #[default]
    BestJobs,
    ByDate,
    FresherAnalysis,
    Group,
}

impl DisplayContext {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayContext::BestJobs => "best_jobs",
            DisplayContext::ByDate => "by_date",
            DisplayContext::FresherAnalysis => "fresher_analysis",
            DisplayContext::Group => "group",
        }
    }

    /// Every context except `BestJobs` runs the eligibility gate.
    pub fn filters_by_eligibility(self) -> bool {
        !matches!(self, DisplayContext::BestJobs)
    }

    pub fn title(self, job_type: Option<JobType>) -> String {
        let label = job_type.map(JobType::label);
        match (self, label) {
            (DisplayContext::FresherAnalysis, _) => "Fresher Job".to_string(),
            (DisplayContext::BestJobs | DisplayContext::ByDate, Some(l)) => format!("{l} Job"),
            (DisplayContext::BestJobs, None) => "Job Position".to_string(),
            (DisplayContext::ByDate, None) => "Job Post".to_string(),
            (DisplayContext::Group, Some(l)) => format!("{l} Message"),
            (DisplayContext::Group, None) => "Message".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions<'r> {
    pub context: DisplayContext,
    pub rules: &'r Rules,
}

impl AssembleOptions<'static> {
    /// Options for `context` with the built-in rules.
    pub fn new(context: DisplayContext) -> Self {
        Self {
            context,
            rules: Rules::builtin(),
        }
    }
}

impl<'r> AssembleOptions<'r> {
    pub fn with_rules(context: DisplayContext, rules: &'r Rules) -> Self {
        Self { context, rules }
    }
}

impl Default for AssembleOptions<'static> {
    fn default() -> Self {
        Self::new(DisplayContext::default())
    }
}

/// Structured view of one message. Borrows its source; never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedPosting<'a> {
    pub company: String,
    pub title: String,
    pub job_type_label: Option<String>,
    /// First-seen order, duplicates kept.
    pub skills: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub location_bucket: LocationBucket,
    pub location_buckets: Vec<LocationBucket>,
    pub apply_link: Option<ApplyLink>,
    pub channel: ApplicationChannel,
    pub eligible: bool,
    pub display_date: Option<String>,
    pub source: &'a RawMessage,
}

pub fn assemble<'a>(raw: &'a RawMessage, opts: &AssembleOptions<'_>) -> ClassifiedPosting<'a> {
    let rules = opts.rules;
    let location = raw.location_field.as_deref();
    let eligible = if opts.context.filters_by_eligibility() {
        is_eligible_with(&raw.text, &rules.eligibility)
    } else {
        true
    };

    let explicit_link = explicit_apply_link(raw);
    // an explicit link speaks for the channel; otherwise scan the text
    let channel = explicit_link
        .as_ref()
        .and_then(ApplyLink::channel)
        .unwrap_or_else(|| application_target(&raw.text).channel);
    let apply_link = explicit_link.or_else(|| extract_apply_link(Some(&raw.text)));

    ClassifiedPosting {
        company: resolve_company(raw),
        title: opts.context.title(raw.job_type),
        job_type_label: raw.job_type.map(JobType::label),
        skills: tokenize_skills(raw.skills_field.as_deref()),
        experience_level: classify_experience(raw.experience.as_deref()),
        location_bucket: classify_location_with(&raw.text, location, &rules.location),
        location_buckets: location_buckets_with(&raw.text, location, &rules.location),
        apply_link,
        channel,
        eligible,
        display_date: format_display_date(&raw.date),
        source: raw,
    }
}

/// Explicit company, then group name, then the sentinel. Blank values are skipped.
pub fn resolve_company(raw: &RawMessage) -> String {
    raw.company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| Some(raw.group.trim()).filter(|g| !g.is_empty()))
        .unwrap_or(COMPANY_NOT_SPECIFIED)
        .to_string()
}

/// Explicit link when it normalizes to a valid one, otherwise the first link in the text.
pub fn resolve_apply_link(raw: &RawMessage) -> Option<ApplyLink> {
    explicit_apply_link(raw).or_else(|| extract_apply_link(Some(&raw.text)))
}

fn explicit_apply_link(raw: &RawMessage) -> Option<ApplyLink> {
    raw.apply_link.as_deref().and_then(ApplyLink::parse)
}

/// `non_tech` -> `Non Tech`: split on `_`, capitalize each word, join with spaces.
pub fn format_job_type_label(raw: &str) -> String {
    raw.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Render a date-like string as `dd/mm/yyyy`; `None` when it cannot be parsed.
pub fn format_display_date(date: &str) -> Option<String> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }
    let day = DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())?;
    Some(day.format("%d/%m/%Y").to_string())
}
