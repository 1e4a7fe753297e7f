// tests/classification_handpicked.rs
//
// Hand-picked messages covering eligibility, experience, location and skills.

use jobfeed_engine::config::{EligibilityRules, Rules};
use jobfeed_engine::eligibility::is_eligible_with;
use jobfeed_engine::location::{classify_location_with, matches_location_with};
use jobfeed_engine::{
    classify_experience, classify_location, is_eligible, location_buckets, matches_location,
    tokenize_skills, ExperienceLevel, LocationBucket,
};

#[test]
fn eligibility_examples() {
    assert!(is_eligible(
        "We are hiring Java developers in Pune for a product team, \
         share your profile at hr@acme.com today"
    ));
    assert!(!is_eligible("Job"));
    assert!(is_eligible(
        "Looking for a junior accountant with two years of experience \
         in a small firm, please send resume soon"
    ));
}

#[test]
fn short_examples_fail_the_word_threshold() {
    // 9 and 11 tokens: contact signal present, but not more than 12 words.
    assert!(!is_eligible(
        "We are hiring! Please apply with resume to hr@company.com"
    ));
    assert!(!is_eligible(
        "Great opportunity, send resume now please consider this role carefully today"
    ));
}

#[test]
fn lower_threshold_from_rules() {
    let rules = EligibilityRules {
        min_words: 5,
        ..EligibilityRules::default()
    };
    assert!(is_eligible_with(
        "We are hiring! Please apply with resume to hr@company.com",
        &rules
    ));
}

#[test]
fn experience_examples() {
    assert_eq!(
        classify_experience(Some("0-1 Years, General Entry Level")),
        ExperienceLevel::ZeroToOne
    );
    assert_eq!(
        classify_experience(Some("Graduate Trainee Program")),
        ExperienceLevel::TraineeIntern
    );
    assert_eq!(classify_experience(None), ExperienceLevel::Unspecified);
}

#[test]
fn location_examples() {
    let t = "Remote work from home, Bangalore based team optional";
    assert!(matches_location(LocationBucket::Remote, t, None));
    assert!(matches_location(LocationBucket::PanIndia, t, None));
    assert_eq!(
        location_buckets(t, None),
        vec![LocationBucket::PanIndia, LocationBucket::Remote]
    );
    assert_eq!(classify_location(t, None), LocationBucket::Remote);
}

#[test]
fn location_keywords_from_rules() {
    let rules = Rules::from_toml_str(
        r#"
        [location]
        international = ["berlin"]
        "#,
    )
    .unwrap();
    assert!(matches_location_with(
        LocationBucket::International,
        "Office in Berlin",
        None,
        &rules.location
    ));
    assert_eq!(
        classify_location_with("Relocate to Dubai", None, &rules.location),
        LocationBucket::Unspecified
    );
}

#[test]
fn skills_example() {
    assert_eq!(
        tokenize_skills(Some("Python, React , , Node.js")),
        vec!["Python", "React", "Node.js"]
    );
}
