//! Fuzz target for Cargo manifest parsing.
//!
//! Goal: the parser should **never panic** on any input.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cargo.toml must be UTF-8
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = depfence_repo::fuzz::parse_manifest(text);
    }
});
