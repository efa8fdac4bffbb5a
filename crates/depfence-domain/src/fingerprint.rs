use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a policy finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - constraint name (if present)
/// - unit
/// - dependency (if present)
pub fn fingerprint_for_violation(
    check_id: &str,
    code: &str,
    constraint: Option<&str>,
    unit: &str,
    dependency: Option<&str>,
) -> String {
    let canonical = [
        check_id,
        code,
        constraint.unwrap_or_default(),
        unit,
        dependency.unwrap_or_default(),
    ]
    .join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
