//! Fuzz target for policy documents.
//!
//! Loading a policy may fail (bad JSON/TOML, undefined ids, invalid regexes) but must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_policy_parser
//! ```

#![no_main]

use depfence_settings::{PolicyFormat, load_policy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = load_policy(text, PolicyFormat::Json);
        let _ = load_policy(text, PolicyFormat::Toml);
    }
});
