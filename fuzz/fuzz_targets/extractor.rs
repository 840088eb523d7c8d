#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use fisherman::extractor::extract_page;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let base = Url::parse("https://wiki.example.com").unwrap();

    // Arbitrary markup must never panic the extractor.
    let _ = extract_page(&html, &base);
});
