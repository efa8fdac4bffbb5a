//! Pure policy evaluation (no IO).
//!
//! Input: a resolved [`Policy`] plus dependency trees supplied by a [`DependencyGraph`] adapter.
//! Output: per-unit check results, component-level cycles and dependency explanations.

#![forbid(unsafe_code)]

pub mod chain;
pub mod checker;
pub mod cycles;
pub mod diagnostics;
pub mod explain;
pub mod fingerprint;
pub mod graph;
pub mod pattern;
pub mod policy;
pub mod report;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use chain::{ChainItem, DependencyChain};
pub use checker::{CheckResult, Checker, Violation};
pub use cycles::{CycleDetector, CycleReport, DotEdges, Membership, MembershipError};
pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use explain::explain;
pub use fingerprint::fingerprint_for_violation;
pub use graph::{DepTree, Dependency, DependencyGraph, DependencySet, GraphError, UNLIMITED_DEPTH};
pub use pattern::{Pattern, PatternError, REGEX_SENTINEL};
pub use policy::{
    CanonicalConstraint, ConstraintKind, OnBreak, Policy, PolicyError, RawConstraint, canonicalize,
};
pub use report::{CheckSummary, findings_from_results};
