//! Fuzz target for JSON graph snapshots: parse, then resolve every unit with a depth limit.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_snapshot_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = depfence_repo::fuzz::parse_snapshot(text);
    }
});
