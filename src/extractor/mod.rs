pub mod cleaner;
pub mod model;
pub mod reader;
pub mod render;

#[cfg(test)]
mod tests;

pub use cleaner::{SanitizeContext, sanitize_and_rewrite};
pub use reader::extract_text_content;
pub use render::{DEFAULT_TITLE, wrap_in_clean_html};

/// Text-mode rendering: extract readable text, then wrap it in a clean shell.
pub fn to_clean_document(html: &str, title: &str) -> String {
    let text = extract_text_content(html);
    wrap_in_clean_html(&text, title)
}
