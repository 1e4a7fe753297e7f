// src/experience.rs
//! Experience-level buckets for fresher-focused views.
//!
//! Classification is first-match over a fixed priority order; the order is
//! part of the contract because descriptors overlap ("0-3 years graduate trainee").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[serde(alias = "0-1")]
    ZeroToOne,
    #[serde(alias = "0-3")]
    ZeroToThree,
    #[serde(alias = "trainee")]
    TraineeIntern,
    Graduate,
    Unspecified,
}

/// Priority order used by `classify_experience`. Do not reorder.
const PRIORITY: [ExperienceLevel; 4] = [
    ExperienceLevel::ZeroToOne,
    ExperienceLevel::ZeroToThree,
    ExperienceLevel::TraineeIntern,
    ExperienceLevel::Graduate,
];

impl ExperienceLevel {
    /// Lower-case phrases that put a descriptor into this bucket.
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            ExperienceLevel::ZeroToOne => &["0-1", "0 to 1", "general entry"],
            ExperienceLevel::ZeroToThree => &["0-3", "1-3", "0 to 3"],
            ExperienceLevel::TraineeIntern => &["trainee", "intern"],
            ExperienceLevel::Graduate => &["graduate"],
            ExperienceLevel::Unspecified => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::ZeroToOne => "0-1 Years",
            ExperienceLevel::ZeroToThree => "0-3 Years",
            ExperienceLevel::TraineeIntern => "Trainee/Intern",
            ExperienceLevel::Graduate => "Graduate",
            ExperienceLevel::Unspecified => "Unspecified",
        }
    }

    /// Membership test used by filter tabs: does the descriptor mention this bucket?
    /// Unlike `classify_experience`, several buckets can match one descriptor.
    /// `Unspecified` matches descriptors that hit no bucket at all.
    pub fn matches(self, level_text: Option<&str>) -> bool {
        if self == ExperienceLevel::Unspecified {
            return classify_experience(level_text) == ExperienceLevel::Unspecified;
        }
        let lvl = level_text.unwrap_or_default().to_lowercase();
        self.phrases().iter().any(|p| lvl.contains(p))
    }
}

/// Map a free-text experience descriptor to its bucket; first match in priority order wins.
pub fn classify_experience(level_text: Option<&str>) -> ExperienceLevel {
    let lvl = level_text.unwrap_or_default().to_lowercase();
    PRIORITY
        .into_iter()
        .find(|level| level.phrases().iter().any(|p| lvl.contains(p)))
        .unwrap_or(ExperienceLevel::Unspecified)
}
