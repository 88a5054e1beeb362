//! Neutralizes a third-party page so it can be served from our origin.
//!
//! The rewrite is a fixed sequence of regex passes, each applied to the
//! output of the previous one. It is deliberately not a DOM parser: markup
//! the patterns don't anticipate (attributes split across lines, unquoted
//! values, nested quotes) passes through untouched.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

use crate::error::ProxyError;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script[^>]*>[\s\S]*?</script>").unwrap());
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s(on[a-z]+)=("[^"]*"|'[^']*')"#).unwrap());
static JAVASCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:href|src)=(?:"\s*javascript:[^"']*"|'\s*javascript:[^"']*')"#).unwrap()
});
static META_REFRESH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta[^>]+http-equiv=["']refresh["'][^>]*>"#).unwrap());
static BASE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<base[^>]*>").unwrap());
static META_CSP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv=["']Content-Security-Policy["'][^>]*>"#).unwrap()
});
static IFRAME_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<iframe[^>]*>[\s\S]*?</iframe>").unwrap());
static FORM_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<form[^>]*>[\s\S]*?</form>").unwrap());

// Root-relative means one leading slash; `//host/...` is protocol-relative.
static ROOT_RELATIVE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s(?:href|src|action)=)(?:"/([^/"'][^"']*)?"|'/([^/"'][^"']*)?')"#)
        .unwrap()
});

static ANCHOR_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<a(\s[^>]*)?>").unwrap());
static HREF_PRESENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"href\s*=").unwrap());
static TARGET_OR_REL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s(target|rel)=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
});

static HEAD_PRESENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<head[\s>]").unwrap());
static HEAD_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<head[^>]*>").unwrap());

const NEW_CONTEXT_ATTRS: &str = r#" target="_blank" rel="noopener noreferrer""#;

/// Where the page came from, resolved once per rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeContext {
    /// `scheme://host[:port]`, no trailing slash.
    pub origin: String,
    /// Source URL cut back to its last `/`.
    pub base_href: String,
}

impl SanitizeContext {
    pub fn from_source(source_url: &str) -> Result<Self, ProxyError> {
        let url = Url::parse(source_url)
            .map_err(|e| ProxyError::Transform(format!("invalid source url {source_url}: {e}")))?;

        let href = url.as_str();
        let base_href = match href.rfind('/') {
            Some(idx) if !href.ends_with('/') => &href[..=idx],
            _ => href,
        };

        Ok(Self {
            origin: url.origin().ascii_serialization(),
            base_href: base_href.to_string(),
        })
    }
}

/// Strip active content from `html` and relink it against `source_url`.
pub fn sanitize_and_rewrite(html: &str, source_url: &str) -> Result<String, ProxyError> {
    let ctx = SanitizeContext::from_source(source_url)?;
    Ok(rewrite(html, &ctx))
}

pub fn rewrite(html: &str, ctx: &SanitizeContext) -> String {
    let mut html = html.to_string();
    for pattern in [
        &*SCRIPT_BLOCK,
        &*EVENT_HANDLER,
        &*JAVASCRIPT_URL,
        &*META_REFRESH,
        &*BASE_TAG,
        &*META_CSP,
        &*IFRAME_BLOCK,
        &*FORM_BLOCK,
    ] {
        html = pattern.replace_all(&html, "").into_owned();
    }

    let html = absolutize_root_relative(&html, &ctx.origin);
    let html = isolate_anchors(&html);

    let html = if HEAD_PRESENT.is_match(&html) {
        html
    } else {
        format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>")
    };

    HEAD_OPEN
        .replace(&html, |caps: &Captures| {
            format!(r#"{}<base href="{}">"#, &caps[0], ctx.base_href)
        })
        .into_owned()
}

fn absolutize_root_relative(html: &str, origin: &str) -> String {
    ROOT_RELATIVE_ATTR
        .replace_all(html, |caps: &Captures| {
            let prefix = &caps[1];
            let quote = &caps[0][prefix.len()..prefix.len() + 1];
            let path = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            format!("{prefix}{quote}{origin}/{path}{quote}")
        })
        .into_owned()
}

fn isolate_anchors(html: &str) -> String {
    ANCHOR_OPEN
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            if !HREF_PRESENT.is_match(tag) {
                return tag.to_string();
            }
            let stripped = TARGET_OR_REL.replace_all(tag, "");
            let without_close = stripped.strip_suffix('>').unwrap_or(stripped.as_ref());
            format!("{without_close}{NEW_CONTEXT_ATTRS}>")
        })
        .into_owned()
}
