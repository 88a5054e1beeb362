#![no_main]

use libfuzzer_sys::fuzz_target;

use policy_relay::extractor::{
    DEFAULT_TITLE, extract_text_content, sanitize_and_rewrite, to_clean_document,
};

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    // None of the transforms may panic, whatever the upstream sends
    let _ = extract_text_content(&html);
    let _ = to_clean_document(&html, DEFAULT_TITLE);
    let _ = sanitize_and_rewrite(&html, "https://sites.example/view/app/privacy");
});
