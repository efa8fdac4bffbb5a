//! The `find-cycles` use case.

use crate::check::select_units;
use crate::fanout::{Fanout, fan_out};
use depfence_domain::{CycleDetector, CycleReport, DepTree, DependencyGraph, Diagnostics, Policy};
use depfence_render::render_dot;
use std::collections::BTreeMap;

pub struct FindCyclesInput<'a> {
    pub policy: &'a Policy,
    pub graph: &'a dyn DependencyGraph,
    /// Roots of the search; empty means every unit the graph knows.
    pub units: Vec<String>,
    /// Bounded fan-out slots for resolving direct imports.
    pub concurrency: usize,
    pub diagnostics: &'a dyn Diagnostics,
}

#[derive(Clone, Debug)]
pub struct FindCyclesOutput {
    pub report: CycleReport,
    /// `strict digraph` listing of the component edges taking part in a cycle.
    pub dot: String,
}

impl FindCyclesOutput {
    pub fn has_cycles(&self) -> bool {
        !self.report.cycles.is_empty()
    }
}

pub fn run_find_cycles(input: FindCyclesInput<'_>) -> anyhow::Result<FindCyclesOutput> {
    let roots = select_units(input.units, input.graph);

    // Every known unit may sit on a path, not only the roots.
    let mut universe = input.graph.units();
    for root in &roots {
        if !universe.contains(root) {
            universe.push(root.clone());
        }
    }

    let resolved = fan_out(&universe, Fanout::Bounded(input.concurrency), |unit| {
        input.graph.resolve(unit, 1)
    })?;

    let mut trees: BTreeMap<String, DepTree> = BTreeMap::new();
    for (unit, tree) in universe.iter().zip(resolved) {
        match tree {
            Ok(tree) => {
                trees.insert(unit.clone(), tree);
            }
            Err(err) => input
                .diagnostics
                .warn(&format!("unable to resolve imports of {unit}: {err}")),
        }
    }

    let report = CycleDetector::new(input.policy, input.diagnostics).find_cycles(&roots, &trees);
    input
        .diagnostics
        .info(&format!("found {} cycle(s)", report.cycles.len()));

    let dot = render_dot(report.dot_edges().iter());
    Ok(FindCyclesOutput { report, dot })
}
