// tests/link_extraction.rs
use jobfeed_engine::link::{application_target, ApplicationChannel};
use jobfeed_engine::{extract_apply_link, sanitize};

fn link(text: &str) -> Option<String> {
    extract_apply_link(Some(text)).map(|l| l.into_string())
}

#[test]
fn handpicked_link_cases() {
    assert_eq!(
        link("Apply here: https://forms.gle/abc123.").as_deref(),
        Some("https://forms.gle/abc123")
    );
    assert_eq!(
        link("Contact www.example.com/jobs now").as_deref(),
        Some("https://www.example.com/jobs")
    );
    assert_eq!(link("No link here, just text"), None);
    assert_eq!(
        link("[Apply](https://x.co/job)").as_deref(),
        Some("https://x.co/job")
    );
}

#[test]
fn chat_formatting_noise_is_stripped() {
    assert_eq!(
        link("👉 *https://careers.acme.io/123*").as_deref(),
        Some("https://careers.acme.io/123")
    );
    assert_eq!(
        link("Link: <https://a.io/x>;").as_deref(),
        Some("https://a.io/x")
    );
    assert_eq!(
        link("`www.jobs.in`").as_deref(),
        Some("https://www.jobs.in")
    );
}

#[test]
fn extracted_links_are_protocol_qualified_and_clean() {
    let samples = [
        "see https://a.io/b) and more",
        "(www.x.org/y).",
        "\"https://q.io/?a=1\",",
        "__https://u.io/v__",
        "~~~https://t.io~~~",
    ];
    for s in samples {
        let l = link(s).unwrap_or_else(|| panic!("no link for {s:?}"));
        assert!(l.starts_with("http://") || l.starts_with("https://"), "{l}");
        assert_eq!(sanitize(&l), l, "leftover markup in {l}");
    }
}

#[test]
fn sanitize_fixpoint_on_noisy_inputs() {
    let samples = [
        " **(https://a.io/x)** ",
        "<<>>",
        "_*_https://a.io_*_.",
        "'\"`[x]`\"'",
        "https://a.io/path.,;:",
        "\t|https://a.io|\n",
    ];
    for s in samples {
        let once = sanitize(s);
        assert_eq!(sanitize(once), once, "{s:?}");
    }
}

#[test]
fn application_channel_for_typical_posts() {
    let t = application_target(
        "Openings at Acme! Apply: https://www.linkedin.com/jobs/view/3901 or mail hr@acme.in",
    );
    assert_eq!(t.channel, ApplicationChannel::LinkedIn);
    assert_eq!(t.emails, vec!["hr@acme.in"]);

    let t = application_target("Send CV to talent@startup.io");
    assert_eq!(t.channel, ApplicationChannel::Email);
    assert_eq!(t.link.as_deref(), Some("talent@startup.io"));
    assert!(t.urls.is_empty());
}
