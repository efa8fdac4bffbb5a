//! Policy document parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves policies provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

use depfence_domain::Policy;
use std::path::Path;

pub use model::{ConstraintConfig, PolicyDocumentV1};
pub use resolve::{PolicyLoadError, resolve_policy};

/// Default policy file name looked up in the working directory.
pub const DEFAULT_POLICY_FILE: &str = "depfence.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyFormat {
    Json,
    Toml,
}

impl PolicyFormat {
    /// `.toml` files are TOML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => PolicyFormat::Toml,
            _ => PolicyFormat::Json,
        }
    }
}

pub fn parse_policy_json(input: &str) -> Result<PolicyDocumentV1, PolicyLoadError> {
    Ok(serde_json::from_str(input)?)
}

pub fn parse_policy_toml(input: &str) -> Result<PolicyDocumentV1, PolicyLoadError> {
    Ok(toml::from_str(input)?)
}

/// Parse and resolve in one step.
pub fn load_policy(input: &str, format: PolicyFormat) -> Result<Policy, PolicyLoadError> {
    let doc = match format {
        PolicyFormat::Json => parse_policy_json(input)?,
        PolicyFormat::Toml => parse_policy_toml(input)?,
    };
    resolve_policy(&doc)
}

/// JSON Schema of the policy document, pretty-printed.
pub fn policy_schema_json() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(PolicyDocumentV1);
    Ok(serde_json::to_string_pretty(&schema)?)
}
