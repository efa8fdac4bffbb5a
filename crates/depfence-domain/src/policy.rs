//! Policy model: components, classes and constraints resolved into matchable patterns.
//!
//! Resolution order matters and is deterministic:
//! 1. component pattern strings are compiled token by token,
//! 2. classes are resolved in lexicographic order of their names, so a class may only
//!    reference classes that sort before it,
//! 3. constraint ids are looked up in classes first, then in components.
//!
//! Canonicalization is all-or-nothing: any unresolved id or bad regex fails the whole policy.

use crate::pattern::{Pattern, PatternError};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Dependencies must match at least one dependency pattern.
    Allow,
    /// Dependencies must match none of the dependency patterns.
    Forbid,
    /// Any other kind text; reported by the checker instead of rejected at load time.
    Other(String),
}

impl ConstraintKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "allow" => ConstraintKind::Allow,
            "forbid" => ConstraintKind::Forbid,
            other => ConstraintKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConstraintKind::Allow => "allow",
            ConstraintKind::Forbid => "forbid",
            ConstraintKind::Other(other) => other,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnBreak {
    Warn,
    Error,
}

impl OnBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            OnBreak::Warn => "warn",
            OnBreak::Error => "error",
        }
    }
}

impl fmt::Display for OnBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constraint as authored: `scope` and `deps` are space-separated component/class ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawConstraint {
    pub name: String,
    pub scope: String,
    pub kind: ConstraintKind,
    pub deps: String,
    pub on_break: OnBreak,
}

/// A constraint with every id resolved into concrete patterns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalConstraint {
    pub name: String,
    /// The originating scope text, kept for display.
    pub scope: String,
    pub component_patterns: Vec<Pattern>,
    pub kind: ConstraintKind,
    pub dep_patterns: Vec<Pattern>,
    pub on_break: OnBreak,
}

impl CanonicalConstraint {
    pub fn applies_to(&self, unit: &str) -> bool {
        self.component_patterns.iter().any(|p| p.matches(unit))
    }
}

impl fmt::Display for CanonicalConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name:\t{}\nscope:\t{}\ncomps:\t[{}]\nkind:\t{}\ndeps:\t[{}]\nlevel:\t{}",
            self.name,
            self.scope,
            join_patterns(&self.component_patterns),
            self.kind,
            join_patterns(&self.dep_patterns),
            self.on_break
        )
    }
}

fn join_patterns(patterns: &[Pattern]) -> String {
    patterns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("undefined id `{id}` referenced by {owner}")]
    UndefinedId { id: String, owner: String },

    #[error("{owner}: {source}")]
    Pattern {
        owner: String,
        #[source]
        source: PatternError,
    },
}

/// A fully resolved, immutable policy. Safe to share across threads for read-only use.
#[derive(Clone, Debug)]
pub struct Policy {
    components: BTreeMap<String, Vec<Pattern>>,
    classes: BTreeMap<String, Vec<Pattern>>,
    constraints: Vec<RawConstraint>,
    canonical: Vec<CanonicalConstraint>,
}

impl Policy {
    pub fn new(
        components: &BTreeMap<String, String>,
        classes: &BTreeMap<String, String>,
        constraints: Vec<RawConstraint>,
    ) -> Result<Self, PolicyError> {
        let components = compile_components(components)?;
        let classes = resolve_classes(classes, &components)?;
        let canonical = canonicalize(&components, &classes, &constraints)?;

        Ok(Self {
            components,
            classes,
            constraints,
            canonical,
        })
    }

    pub fn components(&self) -> &BTreeMap<String, Vec<Pattern>> {
        &self.components
    }

    pub fn classes(&self) -> &BTreeMap<String, Vec<Pattern>> {
        &self.classes
    }

    pub fn raw_constraints(&self) -> &[RawConstraint] {
        &self.constraints
    }

    pub fn canonical_constraints(&self) -> &[CanonicalConstraint] {
        &self.canonical
    }

    /// Names of every component with at least one pattern matching `unit`, in name order.
    pub fn components_for_unit(&self, unit: &str) -> Vec<&str> {
        self.components
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.matches(unit)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Canonical constraints whose scope matches `unit`, in declaration order.
    pub fn applicable_constraints(&self, unit: &str) -> Vec<&CanonicalConstraint> {
        self.canonical
            .iter()
            .filter(|c| c.applies_to(unit))
            .collect()
    }
}

/// Compile each component's whitespace-separated tokens into patterns.
pub fn compile_components(
    components: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Vec<Pattern>>, PolicyError> {
    let mut out = BTreeMap::new();
    for (name, tokens) in components {
        let patterns = tokens
            .split_whitespace()
            .map(Pattern::from_token)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| PolicyError::Pattern {
                owner: format!("component `{name}`"),
                source,
            })?;
        out.insert(name.clone(), patterns);
    }
    Ok(out)
}

/// Resolve classes in lexicographic name order against components and earlier classes.
pub fn resolve_classes(
    classes: &BTreeMap<String, String>,
    components: &BTreeMap<String, Vec<Pattern>>,
) -> Result<BTreeMap<String, Vec<Pattern>>, PolicyError> {
    let mut resolved = BTreeMap::new();
    for (name, refs) in classes {
        let patterns = resolve_ids(refs, &format!("class `{name}`"), components, &resolved)?;
        resolved.insert(name.clone(), patterns);
    }
    Ok(resolved)
}

/// Resolve raw constraints into canonical ones. Pure: the same inputs always yield the same output.
pub fn canonicalize(
    components: &BTreeMap<String, Vec<Pattern>>,
    classes: &BTreeMap<String, Vec<Pattern>>,
    constraints: &[RawConstraint],
) -> Result<Vec<CanonicalConstraint>, PolicyError> {
    constraints
        .iter()
        .map(|raw| {
            let owner = format!("constraint `{}`", raw.name);
            Ok(CanonicalConstraint {
                name: raw.name.clone(),
                scope: raw.scope.clone(),
                component_patterns: resolve_ids(&raw.scope, &owner, components, classes)?,
                kind: raw.kind.clone(),
                dep_patterns: resolve_ids(&raw.deps, &owner, components, classes)?,
                on_break: raw.on_break,
            })
        })
        .collect()
}

fn resolve_ids(
    ids: &str,
    owner: &str,
    components: &BTreeMap<String, Vec<Pattern>>,
    classes: &BTreeMap<String, Vec<Pattern>>,
) -> Result<Vec<Pattern>, PolicyError> {
    let mut out = Vec::new();
    for id in ids.split_whitespace() {
        let patterns =
            resolve_id(id, components, classes).ok_or_else(|| PolicyError::UndefinedId {
                id: id.to_string(),
                owner: owner.to_string(),
            })?;
        out.extend(patterns.iter().cloned());
    }
    Ok(out)
}

// Classes shadow components with the same name.
fn resolve_id<'p>(
    id: &str,
    components: &'p BTreeMap<String, Vec<Pattern>>,
    classes: &'p BTreeMap<String, Vec<Pattern>>,
) -> Option<&'p [Pattern]> {
    classes
        .get(id)
        .or_else(|| components.get(id))
        .map(Vec::as_slice)
}
