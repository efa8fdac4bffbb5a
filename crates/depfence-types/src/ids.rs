//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_POLICY_CONSTRAINT: &str = "policy.constraint";
pub const CHECK_POLICY_GRAPH: &str = "policy.graph";

// Codes: policy.constraint
pub const CODE_CONSTRAINT_VIOLATION: &str = "constraint_violation";
pub const CODE_UNKNOWN_CONSTRAINT_KIND: &str = "unknown_constraint_kind";

// Codes: policy.graph
pub const CODE_UNRESOLVED_DEPENDENCIES: &str = "unresolved_dependencies";
