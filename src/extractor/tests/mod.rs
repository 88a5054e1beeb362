use std::fs;

use crate::extractor::{
    DEFAULT_TITLE, extract_text_content, sanitize_and_rewrite, to_clean_document,
};

const POLICY_SOURCE: &str = "https://sites.example/view/examplegames/privacy";

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn test_extract_google_sites_content_regions() {
    let text = extract_text_content(&fixture("google_sites_policy.html"));

    assert_eq!(
        text,
        "Information We Collect We collect no personal information &lt;ever&gt;. \
         Advertising partners may use device identifiers."
    );
}

#[test]
fn test_extract_plain_page_uses_whole_document() {
    let text = extract_text_content(&fixture("plain_page.html"));

    assert_eq!(
        text,
        "Contact Contact us Email support@example.com for data deletion requests."
    );
}

#[test]
fn test_clean_document_has_no_active_content() {
    let html = to_clean_document(&fixture("google_sites_policy.html"), DEFAULT_TITLE);

    assert!(html.contains("<h1>Privacy Policy</h1>"));
    assert!(html.contains("Advertising partners may use device identifiers."));
    assert!(!html.contains("<script"));
    assert!(!html.contains("Report abuse"));
    assert!(!html.contains("sendBeacon"));
}

#[test]
fn test_sanitize_google_sites_page() {
    let html = sanitize_and_rewrite(&fixture("google_sites_policy.html"), POLICY_SOURCE).unwrap();

    // Active content
    assert!(!html.contains("<script"));
    assert!(!html.contains("onload"));
    assert!(!html.contains("onerror"));
    assert!(!html.contains("javascript:"));
    assert!(!html.contains("<iframe"));
    assert!(!html.contains("frame fallback"));
    assert!(!html.contains("<form"));
    assert!(!html.contains("Subscribe"));
    assert!(!html.contains("http-equiv=\"refresh\""));
    assert!(!html.contains("unsafe-inline"));

    // Base handling
    assert!(!html.contains(r#"<base href="https://sites.example/">"#));
    assert!(html.contains(r#"<head><base href="https://sites.example/view/examplegames/">"#));

    // Relinking
    assert!(html.contains(r#"href="https://sites.example/static/site.css""#));
    assert!(html.contains(r#"<img src="https://sites.example/images/logo.png" alt="logo">"#));
    assert!(html.contains(r#"<img src="assets/badge.png" alt="badge">"#));
    assert!(html.contains(
        r#"<a href="https://sites.example/view/examplegames/home" target="_blank" rel="noopener noreferrer">Home</a>"#
    ));
    assert!(html.contains(
        r#"<a href="https://partner.example/privacy" target="_blank" rel="noopener noreferrer">Partner policy</a>"#
    ));
    assert!(!html.contains("_self"));

    // Visible content survives
    assert!(html.contains("Advertising partners may use device identifiers."));
    assert!(html.contains("<footer>Report abuse</footer>"));
}

#[test]
fn test_sanitize_strips_script_payload_anywhere() {
    for html in [
        "<script>alert(1)</script>",
        "<p>before</p><script>alert(1)</script><p>after</p>",
        "<head></head><body><div><script>alert(1)</script></div></body>",
    ] {
        let out = sanitize_and_rewrite(html, "https://example.com/bar/").unwrap();
        assert!(!out.contains("<script"), "script survived in {out}");
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_transforms_never_panic(html in ".*") {
            let _ = extract_text_content(&html);
            let _ = to_clean_document(&html, DEFAULT_TITLE);
            let _ = sanitize_and_rewrite(&html, "https://example.com/a/b");
        }

        #[test]
        fn test_script_payload_never_survives(
            before in "[a-z0-9 =\"/]{0,40}",
            after in "[a-z0-9 =\"/]{0,40}",
        ) {
            let html = format!("{before}<script>alert(1)</script>{after}");
            let out = sanitize_and_rewrite(&html, "https://example.com/bar/").unwrap();
            prop_assert!(!out.contains("<script"));
        }

        #[test]
        fn test_clean_document_escapes_all_markup(text in ".*") {
            let html = to_clean_document(&format!("<p>{text}</p>"), DEFAULT_TITLE);
            let body = html.split("<p>").nth(1).unwrap_or_default();
            let paragraph = body.split("</p>").next().unwrap_or_default();
            prop_assert!(!paragraph.contains('<'));
        }
    }
}
