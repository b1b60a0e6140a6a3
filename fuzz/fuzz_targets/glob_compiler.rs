#![no_main]

use arbitrary::Arbitrary;
use headerset::glob::PathGlob;
use headerset::{HeaderRecord, VisibilityClass};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    pattern: &'a str,
    path: &'a str,
    class: VisibilityClass,
}

fuzz_target!(|input: Input<'_>| {
    // Compiling and matching must never panic regardless of input
    if let Ok(mut glob) = PathGlob::create(input.pattern, input.class) {
        let _ = glob.matches_path(input.path);
        let _ = glob.matches(&HeaderRecord::new(input.path, VisibilityClass::Public));
    }
});
