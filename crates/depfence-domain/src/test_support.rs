use crate::diagnostics::Diagnostics;
use crate::graph::{DepTree, DependencyGraph, DependencySet, GraphError};
use crate::policy::{ConstraintKind, OnBreak, Policy, RawConstraint};
use std::collections::BTreeMap;
use std::sync::Mutex;

pub fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn constraint(
    name: &str,
    scope: &str,
    kind: &str,
    deps: &str,
    on_break: OnBreak,
) -> RawConstraint {
    RawConstraint {
        name: name.to_string(),
        scope: scope.to_string(),
        kind: ConstraintKind::parse(kind),
        deps: deps.to_string(),
        on_break,
    }
}

/// `cli -> "cmd/"`, `internal -> "internal/"`, one constraint scoped to `cli` over `internal`.
pub fn cli_internal_policy(kind: &str, on_break: OnBreak) -> Policy {
    Policy::new(
        &map(&[("cli", "cmd/"), ("internal", "internal/")]),
        &BTreeMap::new(),
        vec![constraint("cli rule", "cli", kind, "internal", on_break)],
    )
    .expect("valid test policy")
}

pub fn deps(pairs: &[(&str, bool)]) -> DependencySet {
    pairs.iter().map(|(id, platform)| (*id, *platform)).collect()
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    warnings: Mutex<Vec<String>>,
}

impl RecordingDiagnostics {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("diagnostics lock").clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn debug(&self, _message: &str) {}

    fn info(&self, _message: &str) {}

    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .expect("diagnostics lock")
            .push(message.to_string());
    }
}

/// In-memory import graph: unit -> direct imports, in declaration order.
pub struct StaticGraph {
    imports: BTreeMap<String, Vec<String>>,
}

impl StaticGraph {
    pub fn new(edges: &[(&str, &[&str])]) -> Self {
        Self {
            imports: edges
                .iter()
                .map(|(unit, deps)| {
                    (
                        unit.to_string(),
                        deps.iter().map(|d| d.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    fn build(&self, id: &str, path: &mut Vec<String>) -> DepTree {
        let mut node = DepTree::leaf(id);
        if path.iter().any(|p| p == id) {
            return node;
        }
        path.push(id.to_string());
        if let Some(imports) = self.imports.get(id) {
            node.children = imports.iter().map(|d| self.build(d, path)).collect();
        }
        path.pop();
        node
    }
}

impl DependencyGraph for StaticGraph {
    fn resolve(&self, unit: &str, _max_depth: usize) -> Result<DepTree, GraphError> {
        if !self.imports.contains_key(unit) {
            return Err(GraphError::UnknownUnit(unit.to_string()));
        }
        Ok(self.build(unit, &mut Vec::new()))
    }

    fn units(&self) -> Vec<String> {
        self.imports.keys().cloned().collect()
    }
}
