#![no_main]

use libfuzzer_sys::fuzz_target;
use depsentry_extractor::{ManifestExtractor, NpmLockExtractor};

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = NpmLockExtractor.extract(content);
    }
});
