#![no_main]

use libfuzzer_sys::fuzz_target;
use superball_launcher::config::{ConfigStore, Settings, models};

fuzz_target!(|data: &[u8]| {
    // Any input either fails to parse or yields a gap-filled document
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = ConfigStore::parse_document(s) {
            for key in models::default_document().keys() {
                assert!(document.contains_key(key));
            }
            let _settings = Settings::from_document(&document);
            let rendered = ConfigStore::render_document(&document).unwrap();
            let text = std::str::from_utf8(&rendered).unwrap();

            // What lands on disk is a plain JSON object holding the same entries
            let raw: serde_json::Value = serde_json::from_str(text).unwrap();
            assert_eq!(raw.as_object(), Some(&document));

            let reparsed = ConfigStore::parse_document(text).unwrap();
            assert_eq!(document, reparsed);
        }
    }
});
