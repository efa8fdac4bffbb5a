//! The `list` and `graph` use cases: raw dependency enumeration.

use crate::check::select_units;
use depfence_domain::{DepTree, DependencyGraph, Diagnostics, DotEdges, Policy};
use depfence_render::{render_dot, render_plain, render_tree};
use std::collections::BTreeSet;

/// Label of units that belong to no component.
pub const UNDEFINED_LABEL: &str = "UNDEFINED";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFormat {
    #[default]
    Plain,
    Tree,
}

impl ListFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "plain" => Some(Self::Plain),
            "tree" => Some(Self::Tree),
            _ => None,
        }
    }
}

pub struct DepsInput<'a> {
    pub graph: &'a dyn DependencyGraph,
    /// Units to enumerate; empty means every unit the graph knows.
    pub units: Vec<String>,
    pub max_depth: usize,
    pub diagnostics: &'a dyn Diagnostics,
}

/// Resolved trees, one per unit that the graph could resolve.
fn resolve_all(input: DepsInput<'_>) -> Vec<DepTree> {
    select_units(input.units, input.graph)
        .into_iter()
        .filter_map(|unit| match input.graph.resolve(&unit, input.max_depth) {
            Ok(tree) => Some(tree),
            Err(err) => {
                input
                    .diagnostics
                    .warn(&format!("unable to analyze {unit}: {err}"));
                None
            }
        })
        .collect()
}

pub fn run_list(input: DepsInput<'_>, format: ListFormat) -> String {
    resolve_all(input)
        .iter()
        .map(|tree| match format {
            ListFormat::Plain => render_plain(tree),
            ListFormat::Tree => render_tree(tree),
        })
        .collect()
}

/// Component-level DOT graph of every resolved tree.
///
/// Units are labelled with their first component. Edges between equal labels, or touching a
/// label in `skip`, are dropped together with everything below them.
pub fn run_graph(input: DepsInput<'_>, policy: &Policy, skip: &BTreeSet<String>) -> String {
    let mut edges = DotEdges::default();
    for tree in resolve_all(input) {
        collect_edges(&tree, policy, skip, &mut edges);
    }
    render_dot(edges.iter())
}

fn collect_edges(node: &DepTree, policy: &Policy, skip: &BTreeSet<String>, edges: &mut DotEdges) {
    let from = label(policy, &node.id);
    for child in &node.children {
        let to = label(policy, &child.id);
        if from == to || skip.contains(from) || skip.contains(to) {
            continue;
        }
        edges.add(from, to);
        collect_edges(child, policy, skip, edges);
    }
}

fn label<'p>(policy: &'p Policy, unit: &str) -> &'p str {
    policy
        .components_for_unit(unit)
        .first()
        .copied()
        .unwrap_or(UNDEFINED_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{layered_graph, layered_policy};
    use depfence_domain::{NoopDiagnostics, UNLIMITED_DEPTH};

    fn input<'a>(graph: &'a dyn DependencyGraph, units: &[&str], max_depth: usize) -> DepsInput<'a> {
        DepsInput {
            graph,
            units: units.iter().map(|u| u.to_string()).collect(),
            max_depth,
            diagnostics: &NoopDiagnostics,
        }
    }

    #[test]
    fn list_plain_is_depth_first() {
        let graph = layered_graph();
        let out = run_list(input(&graph, &["cmd/app"], UNLIMITED_DEPTH), ListFormat::Plain);
        assert_eq!(out, "cmd/app\npkg/util\ninternal/db\nfmt\n");
    }

    #[test]
    fn list_tree_honours_depth_and_skips_unknown_units() {
        let graph = layered_graph();
        let out = run_list(input(&graph, &["cmd/ghost", "internal/store"], 1), ListFormat::Tree);
        assert_eq!(out, "internal/store\n ├ internal/db\n ├ fmt\n └ ext/log\n");
    }

    #[test]
    fn list_format_parses_known_names() {
        assert_eq!(ListFormat::parse("tree"), Some(ListFormat::Tree));
        assert_eq!(ListFormat::parse("plain"), Some(ListFormat::Plain));
        assert_eq!(ListFormat::parse("json"), None);
    }

    #[test]
    fn graph_labels_units_by_component() {
        let graph = layered_graph();
        let policy = layered_policy();
        let dot = run_graph(input(&graph, &[], UNLIMITED_DEPTH), &policy, &BTreeSet::new());
        assert_eq!(
            dot,
            "strict digraph deps {\ncli -> util\ninternal -> UNDEFINED\nutil -> internal\n}\n"
        );
    }

    #[test]
    fn graph_skip_prunes_the_subtree() {
        let graph = layered_graph();
        let policy = layered_policy();
        let skip: BTreeSet<String> = ["util".to_string()].into();
        let dot = run_graph(input(&graph, &["cmd/app"], UNLIMITED_DEPTH), &policy, &skip);
        assert_eq!(dot, "strict digraph deps {\n}\n");
    }
}
