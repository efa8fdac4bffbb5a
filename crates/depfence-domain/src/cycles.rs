//! Component-level cycle search.
//!
//! Every unit is labelled with its single owning component. A DFS from each root extends a
//! [`DependencyChain`] of `(unit, component)` items and records the chain as soon as it returns
//! to the root's component through a different one.

use crate::chain::{ChainItem, DependencyChain};
use crate::diagnostics::Diagnostics;
use crate::graph::DepTree;
use crate::policy::Policy;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    #[error("{unit} is not part of any component")]
    Undefined { unit: String },

    #[error("{unit} belongs to multiple components: {}", .components.join(", "))]
    Ambiguous {
        unit: String,
        components: Vec<String>,
    },
}

/// Owning component of each unit of interest, plus the units that could not be placed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    owners: BTreeMap<String, String>,
    issues: Vec<MembershipError>,
}

impl Membership {
    pub fn resolve<'u>(policy: &Policy, units: impl IntoIterator<Item = &'u str>) -> Self {
        let mut membership = Membership::default();
        for unit in units {
            match owner_of(policy, unit) {
                Ok(component) => {
                    membership
                        .owners
                        .insert(unit.to_string(), component.to_string());
                }
                Err(issue) => membership.issues.push(issue),
            }
        }
        membership
    }

    pub fn owner(&self, unit: &str) -> Option<&str> {
        self.owners.get(unit).map(String::as_str)
    }

    pub fn issues(&self) -> &[MembershipError] {
        &self.issues
    }
}

fn owner_of<'p>(policy: &'p Policy, unit: &str) -> Result<&'p str, MembershipError> {
    let components = policy.components_for_unit(unit);
    match components.as_slice() {
        [] => Err(MembershipError::Undefined {
            unit: unit.to_string(),
        }),
        [single] => Ok(*single),
        many => Err(MembershipError::Ambiguous {
            unit: unit.to_string(),
            components: many.iter().map(|c| c.to_string()).collect(),
        }),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub cycles: Vec<DependencyChain>,
    /// Roots left out of the search because their membership is undefined or ambiguous.
    pub skipped: Vec<MembershipError>,
}

impl CycleReport {
    pub fn dot_edges(&self) -> DotEdges {
        let mut edges = DotEdges::default();
        for cycle in &self.cycles {
            edges.add_chain(cycle);
        }
        edges
    }
}

/// Deduplicated component-to-component edges, keyed by `"from->to"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DotEdges {
    edges: BTreeMap<String, (String, String)>,
}

impl DotEdges {
    pub fn add(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        self.edges
            .entry(format!("{from}->{to}"))
            .or_insert_with(|| (from.to_string(), to.to_string()));
    }

    pub fn add_chain(&mut self, chain: &DependencyChain) {
        for (from, to) in chain.edges() {
            self.add(&from, &to);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .values()
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

pub struct CycleDetector<'a> {
    policy: &'a Policy,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> CycleDetector<'a> {
    pub fn new(policy: &'a Policy, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            policy,
            diagnostics,
        }
    }

    /// Search cycles starting at each of `roots`.
    ///
    /// `trees` maps units to their resolved trees; only the direct children of each tree are
    /// read, deeper levels are followed through the map. Units without an entry end the branch.
    pub fn find_cycles(&self, roots: &[String], trees: &BTreeMap<String, DepTree>) -> CycleReport {
        let membership = Membership::resolve(self.policy, roots.iter().map(String::as_str));
        for issue in membership.issues() {
            self.diagnostics
                .warn(&format!("unable to check cycles: {issue}"));
        }

        let mut cycles = Vec::new();
        for root in roots {
            let Some(component) = membership.owner(root) else {
                continue;
            };
            self.diagnostics.debug(&format!(
                "searching cycles for {root} of component {component}"
            ));
            let chain = DependencyChain::new().with(ChainItem::compound(root, component));
            self.walk(root, &chain, trees, &mut cycles);
        }

        CycleReport {
            cycles,
            skipped: membership.issues,
        }
    }

    fn walk(
        &self,
        unit: &str,
        chain: &DependencyChain,
        trees: &BTreeMap<String, DepTree>,
        cycles: &mut Vec<DependencyChain>,
    ) {
        let Some(tree) = trees.get(unit) else {
            self.diagnostics
                .debug(&format!("no dependency info for {unit}"));
            return;
        };

        for dep in tree.direct_ids() {
            // Edges leaving the policy's components are invisible here.
            let Ok(component) = owner_of(self.policy, dep) else {
                continue;
            };

            let revisit = chain.contains_unit(dep);
            let next = chain.with(ChainItem::compound(dep, component));
            if next.is_cyclic() {
                cycles.push(next);
                continue;
            }
            // A unit loop inside one component never closes a component cycle.
            if revisit {
                continue;
            }
            self.walk(dep, &next, trees, cycles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoopDiagnostics;
    use crate::test_support::{RecordingDiagnostics, map};

    fn ab_policy() -> Policy {
        Policy::new(
            &map(&[("A", "pkgA/"), ("B", "pkgB/"), ("C", "pkgC/")]),
            &BTreeMap::new(),
            Vec::new(),
        )
        .expect("policy")
    }

    fn trees(edges: &[(&str, &[&str])]) -> BTreeMap<String, DepTree> {
        edges
            .iter()
            .map(|(unit, deps)| {
                let children = deps.iter().map(|d| DepTree::leaf(*d)).collect();
                (unit.to_string(), DepTree::node(*unit, children))
            })
            .collect()
    }

    fn roots(units: &[&str]) -> Vec<String> {
        units.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn finds_two_component_cycle() {
        let policy = ab_policy();
        let detector = CycleDetector::new(&policy, &NoopDiagnostics);
        let graph = trees(&[
            ("pkgA/x", &["pkgB/y"]),
            ("pkgB/y", &["pkgA/z"]),
            ("pkgA/z", &[]),
        ]);

        let report = detector.find_cycles(&roots(&["pkgA/x"]), &graph);

        assert_eq!(report.cycles.len(), 1);
        let cycle = &report.cycles[0];
        assert!(cycle.is_cyclic());
        let names: Vec<&str> = cycle.items().iter().map(ChainItem::name).collect();
        assert_eq!(names, vec!["A", "B", "A"]);
        assert_eq!(cycle.to_string(), "A [pkgA/x] -> B [pkgB/y] -> A [pkgA/z]");
    }

    #[test]
    fn acyclic_graph_reports_nothing() {
        let policy = ab_policy();
        let detector = CycleDetector::new(&policy, &NoopDiagnostics);
        let graph = trees(&[
            ("pkgA/x", &["pkgB/y"]),
            ("pkgB/y", &["pkgC/z"]),
            ("pkgC/z", &[]),
        ]);
        let report = detector.find_cycles(&roots(&["pkgA/x", "pkgB/y", "pkgC/z"]), &graph);
        assert!(report.cycles.is_empty());
        assert!(report.dot_edges().is_empty());
    }

    #[test]
    fn unit_loop_inside_one_component_terminates() {
        let policy = ab_policy();
        let detector = CycleDetector::new(&policy, &NoopDiagnostics);
        let graph = trees(&[("pkgA/a", &["pkgA/b"]), ("pkgA/b", &["pkgA/a"])]);
        let report = detector.find_cycles(&roots(&["pkgA/a"]), &graph);
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn dependencies_outside_components_are_skipped() {
        let policy = ab_policy();
        let detector = CycleDetector::new(&policy, &NoopDiagnostics);
        let graph = trees(&[
            ("pkgA/x", &["vendor/q"]),
            ("vendor/q", &["pkgB/y"]),
            ("pkgB/y", &["pkgA/x"]),
        ]);
        let report = detector.find_cycles(&roots(&["pkgA/x"]), &graph);
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn undefined_and_ambiguous_roots_are_skipped_with_a_note() {
        let policy = Policy::new(
            &map(&[("A", "pkgA/"), ("wide", "pkg")]),
            &BTreeMap::new(),
            Vec::new(),
        )
        .expect("policy");
        let diagnostics = RecordingDiagnostics::default();
        let detector = CycleDetector::new(&policy, &diagnostics);

        let report = detector.find_cycles(&roots(&["pkgA/x", "other/y"]), &BTreeMap::new());

        assert_eq!(
            report.skipped,
            vec![
                MembershipError::Ambiguous {
                    unit: "pkgA/x".to_string(),
                    components: vec!["A".to_string(), "wide".to_string()],
                },
                MembershipError::Undefined {
                    unit: "other/y".to_string(),
                },
            ]
        );
        assert_eq!(diagnostics.warnings().len(), 2);
        assert!(diagnostics.warnings()[0].contains("belongs to multiple components: A, wide"));
    }

    #[test]
    fn membership_places_each_unit_once() {
        let policy = ab_policy();
        let membership = Membership::resolve(&policy, ["pkgA/x", "pkgB/y", "vendor/q"]);
        assert_eq!(membership.owner("pkgA/x"), Some("A"));
        assert_eq!(membership.owner("pkgB/y"), Some("B"));
        assert_eq!(membership.owner("vendor/q"), None);
        assert_eq!(membership.issues().len(), 1);
    }

    #[test]
    fn dot_edges_are_deduplicated_and_drop_self_edges() {
        let policy = ab_policy();
        let detector = CycleDetector::new(&policy, &NoopDiagnostics);
        let graph = trees(&[
            ("pkgA/x", &["pkgA/w", "pkgB/y"]),
            ("pkgA/w", &["pkgB/y"]),
            ("pkgB/y", &["pkgA/z"]),
            ("pkgA/z", &[]),
        ]);

        let report = detector.find_cycles(&roots(&["pkgA/x"]), &graph);

        assert_eq!(report.cycles.len(), 2);
        let dot_edges = report.dot_edges();
        let edges: Vec<(&str, &str)> = dot_edges.iter().collect();
        assert_eq!(edges, vec![("A", "B"), ("B", "A")]);
    }
}
