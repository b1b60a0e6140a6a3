#![no_main]

use headerset::filelist::parse_headers;
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut headers = Vec::new();
        let _ = parse_headers(input, Path::new("fuzz.json"), &mut headers);
    }
});
