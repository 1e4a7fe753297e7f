// src/skills.rs
//! Skill keyword helpers: tokenize the comma-joined skills field and test skill mentions.

/// Split a comma-delimited skills string into trimmed, non-empty tokens.
/// Order and casing are preserved; duplicates are kept.
pub fn tokenize_skills(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive substring test of `skill` against the message text or the raw skills field.
/// A blank skill filters nothing.
pub fn mentions_skill(skill: &str, text: &str, skills_field: Option<&str>) -> bool {
    let needle = skill.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&needle)
        || skills_field.is_some_and(|s| s.to_lowercase().contains(&needle))
}
