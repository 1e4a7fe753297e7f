// src/feed.rs
//! Feed builder: filter a batch of messages for one dashboard view.
//!
//! Order per message: assemble, eligibility gate (filtering contexts only),
//! score floor (`best_jobs` only), location, skill, experience. Then
//! `best_jobs` is ranked by score and the list is truncated to the limit.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::assemble::{assemble, AssembleOptions, ClassifiedPosting, DisplayContext};
use crate::config::Rules;
use crate::experience::ExperienceLevel;
use crate::location::{matches_location_with, LocationBucket};
use crate::model::RawMessage;
use crate::skills::mentions_skill;
use crate::telemetry::{dev_log_drop, DropReason};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedQuery {
    pub context: DisplayContext,
    pub location: Option<LocationBucket>,
    pub skill: Option<String>,
    pub experience: Option<ExperienceLevel>,
    pub limit: Option<usize>,
}

impl FeedQuery {
    pub fn new(context: DisplayContext) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Explicit limit, else the per-view cap (`fresher_analysis`, `best_jobs`), else unlimited.
    pub fn effective_limit(&self, rules: &Rules) -> Option<usize> {
        self.limit.or(match self.context {
            DisplayContext::FresherAnalysis => Some(rules.feed.fresher_limit),
            DisplayContext::BestJobs => Some(rules.feed.best_limit),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed<'a> {
    pub total: usize,
    pub kept: usize,
    pub dropped_ineligible: usize,
    /// Below `feed.best_min_score` in the best-jobs view; a missing score counts as 0.
    pub dropped_low_score: usize,
    /// Dropped by the location, skill or experience filter.
    pub dropped_filtered: usize,
    /// Kept postings per experience bucket label; `fresher_analysis` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_breakdown: Option<BTreeMap<&'static str, usize>>,
    pub postings: Vec<ClassifiedPosting<'a>>,
}

pub fn build_feed<'a>(messages: &'a [RawMessage], query: &FeedQuery, rules: &Rules) -> Feed<'a> {
    let opts = AssembleOptions::with_rules(query.context, rules);
    let skill = query
        .skill
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut dropped_ineligible = 0;
    let mut dropped_low_score = 0;
    let mut dropped_filtered = 0;
    let mut postings = Vec::new();

    for raw in messages {
        let posting = assemble(raw, &opts);
        if !posting.eligible {
            dropped_ineligible += 1;
            dev_log_drop(&raw.text, DropReason::Ineligible);
            continue;
        }
        if query.context == DisplayContext::BestJobs
            && raw.score.unwrap_or(0) < rules.feed.best_min_score
        {
            dropped_low_score += 1;
            dev_log_drop(&raw.text, DropReason::LowScore);
            continue;
        }
        if let Some(reason) = filter_reason(raw, query, skill, rules) {
            dropped_filtered += 1;
            dev_log_drop(&raw.text, reason);
            continue;
        }
        postings.push(posting);
    }

    if query.context == DisplayContext::BestJobs {
        // stable: equal scores keep input order
        postings.sort_by_key(|p| Reverse(p.source.score.unwrap_or(0)));
    }
    if let Some(limit) = query.effective_limit(rules) {
        postings.truncate(limit);
    }
    let experience_breakdown = (query.context == DisplayContext::FresherAnalysis)
        .then(|| experience_breakdown(&postings));

    Feed {
        total: messages.len(),
        kept: postings.len(),
        dropped_ineligible,
        dropped_low_score,
        dropped_filtered,
        experience_breakdown,
        postings,
    }
}

/// Count postings per experience bucket, keyed by the bucket's display label.
pub fn experience_breakdown(postings: &[ClassifiedPosting<'_>]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for p in postings {
        *counts.entry(p.experience_level.label()).or_insert(0) += 1;
    }
    counts
}

fn filter_reason(
    raw: &RawMessage,
    query: &FeedQuery,
    skill: Option<&str>,
    rules: &Rules,
) -> Option<DropReason> {
    if let Some(bucket) = query.location {
        if !matches_location_with(bucket, &raw.text, raw.location_field.as_deref(), &rules.location)
        {
            return Some(DropReason::Location);
        }
    }
    if let Some(skill) = skill {
        if !mentions_skill(skill, &raw.text, raw.skills_field.as_deref()) {
            return Some(DropReason::Skill);
        }
    }
    if let Some(level) = query.experience {
        if !level.matches(raw.experience.as_deref()) {
            return Some(DropReason::Experience);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "We are hiring a backend developer for our growing team, \
                        please send resume to jobs@acme.io before Friday";

    fn fresher(exp: &str) -> RawMessage {
        let mut m = RawMessage::new(POST);
        m.experience = Some(exp.to_string());
        m
    }

    #[test]
    fn ineligible_messages_are_counted_not_kept() {
        let msgs = vec![RawMessage::new(POST), RawMessage::new("Job")];
        let feed = build_feed(&msgs, &FeedQuery::new(DisplayContext::ByDate), Rules::builtin());
        assert_eq!(feed.total, 2);
        assert_eq!(feed.kept, 1);
        assert_eq!(feed.dropped_ineligible, 1);
        assert_eq!(feed.dropped_filtered, 0);
    }

    fn scored(text: &str, score: Option<u32>) -> RawMessage {
        let mut m = RawMessage::new(text);
        m.score = score;
        m
    }

    #[test]
    fn best_jobs_keeps_short_posts() {
        let msgs = vec![scored("Job", Some(75))];
        let feed = build_feed(&msgs, &FeedQuery::default(), Rules::builtin());
        assert_eq!(feed.kept, 1);
        assert_eq!(feed.dropped_ineligible, 0);
    }

    #[test]
    fn best_jobs_ranks_by_score_with_floor() {
        let msgs = vec![
            scored("a", Some(61)),
            scored("b", Some(59)),
            scored("c", Some(90)),
            scored("d", None),
            scored("e", Some(60)),
            scored("f", Some(90)),
        ];
        let feed = build_feed(&msgs, &FeedQuery::default(), Rules::builtin());
        let order: Vec<&str> = feed.postings.iter().map(|p| p.source.text.as_str()).collect();
        assert_eq!(order, vec!["c", "f", "a", "e"]);
        assert_eq!(feed.dropped_low_score, 2);
        assert_eq!(feed.dropped_filtered, 0);
        assert!(feed.experience_breakdown.is_none());
    }

    #[test]
    fn best_jobs_limit_and_floor_are_configurable() {
        let msgs: Vec<_> = (0..10).map(|i| scored("x", Some(10 * i))).collect();
        let mut rules = Rules::default();
        rules.feed.best_min_score = 30;
        rules.feed.best_limit = 3;
        let feed = build_feed(&msgs, &FeedQuery::default(), &rules);
        let scores: Vec<_> = feed.postings.iter().map(|p| p.source.score).collect();
        assert_eq!(scores, vec![Some(90), Some(80), Some(70)]);
        assert_eq!(feed.dropped_low_score, 3);
    }

    #[test]
    fn other_views_ignore_score() {
        let msgs = vec![scored(POST, None), scored(POST, Some(95))];
        let feed = build_feed(&msgs, &FeedQuery::new(DisplayContext::ByDate), Rules::builtin());
        assert_eq!(feed.kept, 2);
        assert_eq!(feed.postings[0].source.score, None);
    }

    #[test]
    fn fresher_view_reports_experience_breakdown() {
        let msgs = vec![
            fresher("0-1 years"),
            fresher("General entry level"),
            fresher("Graduate trainee"),
            fresher("2025 graduates"),
            fresher(""),
        ];
        let feed = build_feed(
            &msgs,
            &FeedQuery::new(DisplayContext::FresherAnalysis),
            Rules::builtin(),
        );
        let breakdown = feed.experience_breakdown.unwrap();
        assert_eq!(breakdown.get("0-1 Years"), Some(&2));
        assert_eq!(breakdown.get("Trainee/Intern"), Some(&1));
        assert_eq!(breakdown.get("Graduate"), Some(&1));
        assert_eq!(breakdown.get("Unspecified"), Some(&1));
        assert_eq!(breakdown.get("0-3 Years"), None);
        assert_eq!(breakdown.values().sum::<usize>(), feed.kept);
    }

    #[test]
    fn fresher_limit_applies_by_default() {
        let msgs: Vec<_> = (0..5).map(|_| fresher("0-1 years")).collect();
        let mut rules = Rules::default();
        rules.feed.fresher_limit = 3;
        let q = FeedQuery::new(DisplayContext::FresherAnalysis);
        assert_eq!(build_feed(&msgs, &q, &rules).kept, 3);

        let q = FeedQuery {
            limit: Some(4),
            ..FeedQuery::new(DisplayContext::FresherAnalysis)
        };
        assert_eq!(build_feed(&msgs, &q, &rules).kept, 4);
        assert_eq!(
            build_feed(&msgs, &FeedQuery::new(DisplayContext::ByDate), &rules).kept,
            5
        );
    }

    #[test]
    fn experience_tab_uses_membership() {
        let msgs = vec![fresher("0-1 or 1-3 years"), fresher("Graduate"), fresher("")];
        let q = FeedQuery {
            experience: Some(ExperienceLevel::ZeroToThree),
            ..FeedQuery::new(DisplayContext::FresherAnalysis)
        };
        let feed = build_feed(&msgs, &q, Rules::builtin());
        assert_eq!(feed.kept, 1);
        assert_eq!(feed.dropped_filtered, 2);

        let q = FeedQuery {
            experience: Some(ExperienceLevel::Unspecified),
            ..FeedQuery::new(DisplayContext::FresherAnalysis)
        };
        assert_eq!(build_feed(&msgs, &q, Rules::builtin()).kept, 1);
    }

    #[test]
    fn blank_skill_filters_nothing() {
        let msgs = vec![RawMessage::new(POST)];
        let q = FeedQuery {
            skill: Some("   ".into()),
            ..FeedQuery::new(DisplayContext::Group)
        };
        assert_eq!(build_feed(&msgs, &q, Rules::builtin()).kept, 1);
        let q = FeedQuery {
            skill: Some("kotlin".into()),
            ..FeedQuery::new(DisplayContext::Group)
        };
        assert_eq!(build_feed(&msgs, &q, Rules::builtin()).dropped_filtered, 1);
    }
}
