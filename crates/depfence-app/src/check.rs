//! The `check` use case: evaluate every unit against the policy and produce a report.

use crate::fanout::{Fanout, fan_out};
use crate::report::build_report;
use depfence_domain::{
    CheckResult, CheckSummary, Checker, DependencyGraph, Diagnostics, Policy,
};
use depfence_types::{DepfenceReport, Verdict};
use time::OffsetDateTime;

/// Input for the check use case.
pub struct CheckInput<'a> {
    pub policy: &'a Policy,
    pub graph: &'a dyn DependencyGraph,
    /// Units to check; empty means every unit the graph knows.
    pub units: Vec<String>,
    pub diagnostics: &'a dyn Diagnostics,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// Per-unit results, in unit order.
    pub results: Vec<CheckResult>,
    pub summary: CheckSummary,
    pub report: DepfenceReport,
}

pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();
    let units = select_units(input.units, input.graph);
    input
        .diagnostics
        .info(&format!("checking {} unit(s)", units.len()));

    let checker = Checker::new(input.policy, input.diagnostics);
    let results = fan_out(&units, Fanout::Unbounded, |unit| {
        checker.check_unit(unit, input.graph)
    })?;

    let summary = CheckSummary::from_results(&results);
    input.diagnostics.info(&format!(
        "check done: {} error(s), {} warning(s)",
        summary.errors, summary.warnings
    ));

    let report = build_report(&results, started_at, OffsetDateTime::now_utc());
    Ok(CheckOutput {
        results,
        summary,
        report,
    })
}

/// One line per violation, warnings before errors within a unit.
pub fn format_violations(results: &[CheckResult]) -> String {
    let mut out = String::new();
    for result in results {
        for (severity, v) in result.violations() {
            let tag = match severity {
                depfence_types::Severity::Warning => "warning",
                depfence_types::Severity::Error => "error",
            };
            out.push_str(&format!("{tag}: {}\n", v.message));
        }
    }
    out
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

pub(crate) fn select_units(units: Vec<String>, graph: &dyn DependencyGraph) -> Vec<String> {
    if units.is_empty() {
        graph.units()
    } else {
        units
    }
}
