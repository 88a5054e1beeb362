use regex::Regex;
use std::sync::LazyLock;

use crate::extractor::model::strip_tags;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").unwrap());
static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style>").unwrap());

/// Regions that usually hold the readable body, checked in this order.
/// Google Sites pages wrap their text in `div`s with a `content` class.
static CONTENT_REGIONS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r#"(?i)<div[^>]*class="[^"]*content[^"]*"[^>]*>([\s\S]*?)</div>"#).unwrap(),
        Regex::new(r"(?i)<main[^>]*>([\s\S]*?)</main>").unwrap(),
        Regex::new(r"(?i)<article[^>]*>([\s\S]*?)</article>").unwrap(),
        Regex::new(r#"(?i)<div[^>]*role="main"[^>]*>([\s\S]*?)</div>"#).unwrap(),
    ]
});

/// Plain-text approximation of `html`, preferring main-content regions.
///
/// Regions are matched against the unstripped input, so a script nested in
/// a region contributes its text. With no region found the whole document
/// minus scripts and styles is used.
pub fn extract_text_content(html: &str) -> String {
    let mut regions = String::new();
    for pattern in CONTENT_REGIONS.iter() {
        for caps in pattern.captures_iter(html) {
            if let Some(inner) = caps.get(1).filter(|m| !m.is_empty()) {
                regions.push_str(inner.as_str());
                regions.push('\n');
            }
        }
    }

    if regions.is_empty() {
        let without_scripts = SCRIPT_BLOCK.replace_all(html, "");
        let without_styles = STYLE_BLOCK.replace_all(&without_scripts, "");
        strip_tags(&without_styles)
    } else {
        strip_tags(&regions)
    }
}
