// src/lib.rs
// Public library surface for the binary and integration tests.

// Core: pure extraction and classification
pub mod assemble;
pub mod eligibility;
pub mod experience;
pub mod link;
pub mod location;
pub mod model;
pub mod skills;

// Outer layers
pub mod api;
pub mod config;
pub mod feed;
pub mod metrics;
pub mod telemetry;
pub mod wire;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::assemble::{assemble, AssembleOptions, ClassifiedPosting, DisplayContext};
pub use crate::config::Rules;
pub use crate::eligibility::is_eligible;
pub use crate::experience::{classify_experience, ExperienceLevel};
pub use crate::feed::{build_feed, Feed, FeedQuery};
pub use crate::link::{extract_apply_link, sanitize, ApplyLink};
pub use crate::location::{classify_location, location_buckets, matches_location, LocationBucket};
pub use crate::model::{JobType, RawMessage};
pub use crate::skills::tokenize_skills;
pub use crate::wire::WireMessage;
