//! The `why` and `who` use cases: dependency paths between units.

use crate::check::select_units;
use crate::fanout::{Fanout, fan_out};
use anyhow::Context;
use depfence_domain::{DependencyChain, DependencyGraph, Diagnostics, explain};

/// Every path from `source` down to `target`.
pub fn run_why(
    graph: &dyn DependencyGraph,
    source: &str,
    target: &str,
    max_depth: usize,
) -> anyhow::Result<Vec<DependencyChain>> {
    let tree = graph
        .resolve(source, max_depth)
        .with_context(|| format!("resolve dependencies of {source}"))?;
    Ok(explain(&tree, target))
}

pub struct WhoInput<'a> {
    pub graph: &'a dyn DependencyGraph,
    pub target: String,
    /// Candidate dependents; empty means every unit the graph knows.
    pub units: Vec<String>,
    pub max_depth: usize,
    pub concurrency: usize,
    pub diagnostics: &'a dyn Diagnostics,
}

/// Paths from `unit` to the target of a `who` query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependent {
    pub unit: String,
    pub chains: Vec<DependencyChain>,
}

/// Every unit that reaches `target`, with the paths it takes. Units whose dependencies cannot be
/// resolved are skipped with a warning.
pub fn run_who(input: WhoInput<'_>) -> anyhow::Result<Vec<Dependent>> {
    let target = input.target.as_str();
    let units: Vec<String> = select_units(input.units, input.graph)
        .into_iter()
        .filter(|unit| unit != target)
        .collect();
    input.diagnostics.debug(&format!(
        "looking for dependents of {target} among {} unit(s)",
        units.len()
    ));

    let found = fan_out(&units, Fanout::Bounded(input.concurrency), |unit| {
        match input.graph.resolve(unit, input.max_depth) {
            Ok(tree) => explain(&tree, target),
            Err(err) => {
                input
                    .diagnostics
                    .warn(&format!("unable to resolve dependencies of {unit}: {err}"));
                Vec::new()
            }
        }
    })?;

    Ok(units
        .into_iter()
        .zip(found)
        .filter(|(_, chains)| !chains.is_empty())
        .map(|(unit, chains)| Dependent { unit, chains })
        .collect())
}

pub fn format_chains<'a>(chains: impl IntoIterator<Item = &'a DependencyChain>) -> String {
    chains.into_iter().map(|chain| format!("{chain}\n")).collect()
}
