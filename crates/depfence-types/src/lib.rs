//! Stable DTOs and IDs used across the depfence workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted check report
//! - stable string IDs and codes

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;

pub use receipt::{
    DepfenceData, DepfenceReport, Finding, ReportEnvelope, SCHEMA_REPORT_V1, Severity, ToolMeta,
    Verdict,
};
