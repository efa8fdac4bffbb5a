use crate::diagnostics::Diagnostics;
use crate::graph::{Dependency, DependencyGraph, DependencySet, UNLIMITED_DEPTH};
use crate::policy::{CanonicalConstraint, ConstraintKind, OnBreak, Policy};
use depfence_types::{Severity, ids};
use std::fmt;

/// A single broken rule for one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub check_id: &'static str,
    pub code: &'static str,
    pub constraint: Option<String>,
    pub unit: String,
    pub dependency: Option<String>,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckResult {
    pub unit: String,
    /// Number of constraints whose scope matched the unit.
    pub constraints_applied: usize,
    pub warnings: Vec<Violation>,
    pub errors: Vec<Violation>,
}

impl CheckResult {
    pub fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            ..Self::default()
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.constraints_applied == 0
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    /// Warnings first, then errors.
    pub fn violations(&self) -> impl Iterator<Item = (Severity, &Violation)> {
        self.warnings
            .iter()
            .map(|v| (Severity::Warning, v))
            .chain(self.errors.iter().map(|v| (Severity::Error, v)))
    }

    fn record(&mut self, on_break: OnBreak, violation: Violation) {
        match on_break {
            OnBreak::Warn => self.warnings.push(violation),
            OnBreak::Error => self.errors.push(violation),
        }
    }
}

/// Applies a policy's canonical constraints to one unit at a time.
pub struct Checker<'a> {
    policy: &'a Policy,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> Checker<'a> {
    pub fn new(policy: &'a Policy, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            policy,
            diagnostics,
        }
    }

    /// Check `unit` against an already-resolved dependency set.
    pub fn check(&self, unit: &str, deps: &DependencySet) -> CheckResult {
        let applicable = self.applicable(unit);
        self.check_constraints(unit, &applicable, deps)
    }

    /// Resolve the unit through `graph`, then check it.
    ///
    /// Resolution failures stay local to this unit's result.
    pub fn check_unit(&self, unit: &str, graph: &dyn DependencyGraph) -> CheckResult {
        let applicable = self.applicable(unit);
        if applicable.is_empty() {
            return CheckResult::new(unit);
        }

        match graph.resolve(unit, UNLIMITED_DEPTH) {
            Ok(tree) => self.check_constraints(unit, &applicable, &tree.dependency_set()),
            Err(err) => {
                let mut result = CheckResult::new(unit);
                result.constraints_applied = applicable.len();
                result.errors.push(Violation {
                    check_id: ids::CHECK_POLICY_GRAPH,
                    code: ids::CODE_UNRESOLVED_DEPENDENCIES,
                    constraint: None,
                    unit: unit.to_string(),
                    dependency: None,
                    message: format!("unable to resolve dependencies of {unit}: {err}"),
                });
                result
            }
        }
    }

    fn applicable(&self, unit: &str) -> Vec<&'a CanonicalConstraint> {
        let applicable = self.policy.applicable_constraints(unit);
        self.diagnostics.debug(&format!(
            "checking ({} constraints) unit {unit}",
            applicable.len()
        ));
        if applicable.is_empty() {
            self.diagnostics
                .warn(&format!("{unit} does not have constraints"));
        }
        applicable
    }

    fn check_constraints(
        &self,
        unit: &str,
        applicable: &[&CanonicalConstraint],
        deps: &DependencySet,
    ) -> CheckResult {
        let mut result = CheckResult::new(unit);
        result.constraints_applied = applicable.len();

        for constraint in applicable {
            match &constraint.kind {
                ConstraintKind::Allow => {
                    for dep in deps.iter().filter(|d| !d.platform) {
                        if !constraint.dep_patterns.iter().any(|p| p.matches(&dep.id)) {
                            result.record(constraint.on_break, broken(constraint, unit, &dep));
                        }
                    }
                }
                ConstraintKind::Forbid => {
                    for dep in deps.iter().filter(|d| !d.platform) {
                        if let Some(p) = constraint.dep_patterns.iter().find(|p| p.matches(&dep.id))
                        {
                            self.diagnostics.debug(&format!(
                                "forbid: {} matches {p} in `{}`",
                                dep.id, constraint.name
                            ));
                            result.record(constraint.on_break, broken(constraint, unit, &dep));
                        }
                    }
                }
                // Always an error, whatever the configured level.
                ConstraintKind::Other(kind) => result.errors.push(Violation {
                    check_id: ids::CHECK_POLICY_CONSTRAINT,
                    code: ids::CODE_UNKNOWN_CONSTRAINT_KIND,
                    constraint: Some(constraint.name.clone()),
                    unit: unit.to_string(),
                    dependency: None,
                    message: format!(
                        "unable to check constraint {:?} of kind `{kind}`",
                        constraint.name
                    ),
                }),
            }
        }

        result
    }
}

fn broken(constraint: &CanonicalConstraint, unit: &str, dep: &Dependency) -> Violation {
    Violation {
        check_id: ids::CHECK_POLICY_CONSTRAINT,
        code: ids::CODE_CONSTRAINT_VIOLATION,
        constraint: Some(constraint.name.clone()),
        unit: unit.to_string(),
        dependency: Some(dep.id.clone()),
        message: format!(
            "{unit} depends on {} so it breaks {:?}",
            dep.id, constraint.name
        ),
    }
}
