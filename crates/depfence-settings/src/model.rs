use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Policy document schema v1 (`depfence.json` / `depfence.toml`).
///
/// This is a *user-facing* model: unknown keys are ignored so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyDocumentV1 {
    /// Optional schema reference for editors.
    #[serde(
        rename = "$schema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema: Option<String>,

    /// Component name -> whitespace-separated pattern tokens. `~expr` tokens are regexes.
    #[serde(default)]
    pub components: BTreeMap<String, String>,

    /// Class name -> whitespace-separated component or class names.
    #[serde(default)]
    pub classes: BTreeMap<String, String>,

    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConstraintConfig {
    pub name: String,

    /// Space-separated component/class ids the constraint applies to.
    pub scope: String,

    /// `allow` or `forbid`.
    pub kind: String,

    /// Space-separated component/class ids the scope may (allow) or may not (forbid) depend on.
    pub deps: String,

    /// `warn` or `error`.
    #[serde(rename = "onBreak", alias = "onbreak")]
    pub on_break: String,
}
