// src/link.rs
//! Apply-link heuristics.
//!
//! - `sanitize`: strip markdown/quoting wrappers and trailing punctuation from a URL-like token
//! - `extract_apply_link`: first protocol-qualified URL in free text, normalized
//! - `application_target`: where a candidate applies (job board, career page, email)
//!
//! All of this is best-effort pattern matching over chat text, not URL or markdown parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper characters stripped from both ends of a candidate link.
const WRAPPERS: &[char] = &[
    '*', '_', '~', '`', '[', ']', '(', ')', '{', '}', '|', '\\', '^', '<', '>', '"', '\'',
];
/// Sentence punctuation stripped from the end only.
const TRAILING_PUNCT: &[char] = &[',', '.', ';', ':'];

static RE_APPLY_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").expect("apply-url regex"));

static RE_ANY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"{}|\\^`\[\]]+"#).expect("url regex")
});

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});

const CAREER_HINTS: &[&str] = &["career", "job", "apply", "recruitment", "hiring"];

/// Strip wrapper noise from the start and wrapper/punctuation noise from the end.
///
/// Whitespace is stripped together with the noise characters, so one pass
/// reaches the fixpoint: `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(raw: &str) -> &str {
    raw.trim_start_matches(|c: char| c.is_whitespace() || WRAPPERS.contains(&c))
        .trim_end_matches(|c: char| {
            c.is_whitespace() || WRAPPERS.contains(&c) || TRAILING_PUNCT.contains(&c)
        })
}

/// A dereferenceable link. Always starts with `http://` or `https://`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ApplyLink(String);

impl ApplyLink {
    /// Sanitize `candidate`, qualify a bare `www.` host with `https://`, and
    /// accept it only if it is protocol-qualified with a non-empty host afterwards.
    pub fn parse(candidate: &str) -> Option<Self> {
        let cleaned = sanitize(candidate);
        let link = if cleaned.starts_with("www.") {
            format!("https://{cleaned}")
        } else {
            cleaned.to_string()
        };
        let rest = link
            .strip_prefix("http://")
            .or_else(|| link.strip_prefix("https://"))?;
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            return None;
        }
        Some(Self(link))
    }

    /// Channel implied by this link alone, if it points at a job board or career page.
    pub fn channel(&self) -> Option<ApplicationChannel> {
        channel_for_url(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ApplyLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplyLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First `http(s)://` or `www.` token in `text`, normalized. Later URLs are ignored.
pub fn extract_apply_link(text: Option<&str>) -> Option<ApplyLink> {
    let m = RE_APPLY_URL.find(text?)?;
    ApplyLink::parse(m.as_str())
}

/// How a candidate is expected to respond to a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationChannel {
    #[serde(rename = "linkedin")]
    LinkedIn,
    Naukri,
    Indeed,
    Instahyre,
    CareerPage,
    Email,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationTarget {
    pub channel: ApplicationChannel,
    /// The URL or email address the channel was derived from.
    pub link: Option<String>,
    pub urls: Vec<String>,
    pub emails: Vec<String>,
}

/// Collect every URL and email in `text` and pick the application channel.
///
/// URLs are tried in order: the first one pointing at a known job board or
/// carrying a career hint wins. With no such URL the first email is used.
pub fn application_target(text: &str) -> ApplicationTarget {
    let urls: Vec<String> = RE_ANY_URL
        .find_iter(text)
        .map(|m| sanitize(m.as_str()).to_string())
        .filter(|u| !u.is_empty())
        .collect();
    let emails: Vec<String> = RE_EMAIL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let by_url = urls
        .iter()
        .find_map(|u| channel_for_url(u).map(|c| (c, u.clone())));

    let (channel, link) = match (by_url, emails.first()) {
        (Some((c, u)), _) => (c, Some(u)),
        (None, Some(e)) => (ApplicationChannel::Email, Some(e.clone())),
        (None, None) => (ApplicationChannel::Unknown, None),
    };

    ApplicationTarget {
        channel,
        link,
        urls,
        emails,
    }
}

fn channel_for_url(url: &str) -> Option<ApplicationChannel> {
    let u = url.to_lowercase();
    if u.contains("linkedin.com/job") {
        Some(ApplicationChannel::LinkedIn)
    } else if u.contains("naukri.com") {
        Some(ApplicationChannel::Naukri)
    } else if u.contains("indeed.com") {
        Some(ApplicationChannel::Indeed)
    } else if u.contains("instahyre.com") {
        Some(ApplicationChannel::Instahyre)
    } else if CAREER_HINTS.iter().any(|k| u.contains(k)) {
        Some(ApplicationChannel::CareerPage)
    } else {
        None
    }
}
