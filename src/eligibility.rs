// src/eligibility.rs
//! Eligibility gate for message lists that carry no editorial quality score.
//!
//! A message passes when it has a contact signal (email, phone-like digit run,
//! or an apply phrase) AND more than `min_words` whitespace-delimited tokens.
//! Cheap and explainable; false positives/negatives are expected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{EligibilityRules, Rules};

// Applied to lower-cased text.
static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email regex"));
// Unanchored, so any run of 10+ digits counts.
static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?[0-9]{10,13}").expect("phone regex"));

/// Eligibility with the built-in rules (phrases `apply`, `send resume`, `email`; > 12 words).
pub fn is_eligible(text: &str) -> bool {
    is_eligible_with(text, &Rules::builtin().eligibility)
}

pub fn is_eligible_with(text: &str, rules: &EligibilityRules) -> bool {
    word_count(text) > rules.min_words && has_contact_signal(text, &rules.contact_phrases)
}

/// Email, phone-like digit run, or any of `phrases` (expected lower-case).
pub fn has_contact_signal(text: &str, phrases: &[String]) -> bool {
    let lower = text.to_lowercase();
    RE_EMAIL.is_match(&lower)
        || RE_PHONE.is_match(&lower)
        || phrases.iter().any(|p| lower.contains(p.as_str()))
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
