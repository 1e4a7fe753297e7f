// src/location.rs
//! Location buckets (pan-India / remote / international).
//!
//! Matching is lower-cased substring search over the union of the message
//! text and the separate location field. Buckets overlap: a message can be
//! both `pan_india` and `remote`. `matches_location` and `location_buckets`
//! keep that membership view; `classify_location` picks one label for
//! records that need a single bucket.

use serde::{Deserialize, Serialize};

use crate::config::{LocationRules, Rules};

pub const PAN_INDIA_KEYWORDS: &[&str] = &[
    "india",
    "indian",
    "bangalore",
    "mumbai",
    "delhi",
    "pune",
    "hyderabad",
    "chennai",
];
/// Explicit nationwide phrases. They outrank every other bucket for the single label.
pub const PAN_INDIA_PHRASES: &[&str] = &[
    "pan india",
    "pan-india",
    "panindia",
    "all india",
    "anywhere in india",
    "multiple locations",
    "various locations",
    "india wide",
    "any location in india",
];
pub const REMOTE_KEYWORDS: &[&str] = &["remote", "wfh", "work from home"];
pub const INTERNATIONAL_KEYWORDS: &[&str] =
    &["usa", "uk", "singapore", "dubai", "canada", "australia"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationBucket {
    PanIndia,
    Remote,
    International,
    Unspecified,
}

/// Buckets in reporting order.
const BUCKETS: [LocationBucket; 3] = [
    LocationBucket::PanIndia,
    LocationBucket::Remote,
    LocationBucket::International,
];

/// Single-label precedence after the explicit pan-India phrases:
/// remote, then international, then the pan-India keywords.
const LABEL_PRECEDENCE: [LocationBucket; 3] = [
    LocationBucket::Remote,
    LocationBucket::International,
    LocationBucket::PanIndia,
];

/// Lower-cased haystacks, computed once per message.
struct Haystack {
    text: String,
    location: String,
}

impl Haystack {
    fn new(text: &str, location_field: Option<&str>) -> Self {
        Self {
            text: text.to_lowercase(),
            location: location_field.unwrap_or_default().to_lowercase(),
        }
    }

    fn hits(&self, keywords: &[String]) -> bool {
        keywords
            .iter()
            .any(|k| self.text.contains(k.as_str()) || self.location.contains(k.as_str()))
    }

    fn in_bucket(&self, bucket: LocationBucket, rules: &LocationRules) -> bool {
        match bucket {
            LocationBucket::Unspecified => BUCKETS.iter().all(|b| !self.hits(rules.keywords(*b))),
            b => self.hits(rules.keywords(b)),
        }
    }
}

/// Does the message match `bucket`? `Unspecified` matches messages that hit no bucket.
pub fn matches_location(bucket: LocationBucket, text: &str, location_field: Option<&str>) -> bool {
    matches_location_with(bucket, text, location_field, &Rules::builtin().location)
}

pub fn matches_location_with(
    bucket: LocationBucket,
    text: &str,
    location_field: Option<&str>,
    rules: &LocationRules,
) -> bool {
    Haystack::new(text, location_field).in_bucket(bucket, rules)
}

/// Every bucket the message matches, in the order pan_india, remote, international.
pub fn location_buckets(text: &str, location_field: Option<&str>) -> Vec<LocationBucket> {
    location_buckets_with(text, location_field, &Rules::builtin().location)
}

pub fn location_buckets_with(
    text: &str,
    location_field: Option<&str>,
    rules: &LocationRules,
) -> Vec<LocationBucket> {
    let hay = Haystack::new(text, location_field);
    BUCKETS
        .into_iter()
        .filter(|b| hay.hits(rules.keywords(*b)))
        .collect()
}

/// One label for the message, else `Unspecified`. An explicit pan-India phrase
/// ("pan india", "multiple locations", ...) wins; then remote > international > pan_india.
pub fn classify_location(text: &str, location_field: Option<&str>) -> LocationBucket {
    classify_location_with(text, location_field, &Rules::builtin().location)
}

pub fn classify_location_with(
    text: &str,
    location_field: Option<&str>,
    rules: &LocationRules,
) -> LocationBucket {
    let hay = Haystack::new(text, location_field);
    if hay.hits(&rules.pan_india_phrases) {
        return LocationBucket::PanIndia;
    }
    LABEL_PRECEDENCE
        .into_iter()
        .find(|b| hay.hits(rules.keywords(*b)))
        .unwrap_or(LocationBucket::Unspecified)
}
