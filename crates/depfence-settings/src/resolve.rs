use crate::model::PolicyDocumentV1;
use depfence_domain::{ConstraintKind, OnBreak, Policy, PolicyError, RawConstraint};

#[derive(Debug, thiserror::Error)]
pub enum PolicyLoadError {
    #[error("malformed JSON policy: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML policy: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("constraint `{constraint}`: invalid onBreak `{value}` (expected warn|error)")]
    InvalidOnBreak { constraint: String, value: String },

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Turn a parsed document into an immutable, fully canonicalized policy.
pub fn resolve_policy(doc: &PolicyDocumentV1) -> Result<Policy, PolicyLoadError> {
    let constraints = doc
        .constraints
        .iter()
        .map(|c| {
            Ok(RawConstraint {
                name: c.name.clone(),
                scope: c.scope.clone(),
                kind: ConstraintKind::parse(&c.kind),
                deps: c.deps.clone(),
                on_break: parse_on_break(&c.name, &c.on_break)?,
            })
        })
        .collect::<Result<Vec<_>, PolicyLoadError>>()?;

    Ok(Policy::new(&doc.components, &doc.classes, constraints)?)
}

fn parse_on_break(constraint: &str, value: &str) -> Result<OnBreak, PolicyLoadError> {
    match value {
        "warn" => Ok(OnBreak::Warn),
        "error" => Ok(OnBreak::Error),
        other => Err(PolicyLoadError::InvalidOnBreak {
            constraint: constraint.to_string(),
            value: other.to_string(),
        }),
    }
}
