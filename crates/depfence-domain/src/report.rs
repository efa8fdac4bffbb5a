use crate::checker::CheckResult;
use crate::fingerprint::fingerprint_for_violation;
use depfence_types::{DepfenceData, Finding, Verdict};

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Aggregate over per-unit check results. Independent of result order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub units_checked: u32,
    pub units_unconstrained: u32,
    pub warnings: u32,
    pub errors: u32,
}

impl CheckSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = CheckSummary::default();
        for r in results {
            summary.units_checked = summary.units_checked.saturating_add(1);
            if r.is_unconstrained() {
                summary.units_unconstrained = summary.units_unconstrained.saturating_add(1);
            }
            summary.warnings = summary.warnings.saturating_add(count(r.warnings.len()));
            summary.errors = summary.errors.saturating_add(count(r.errors.len()));
        }
        summary
    }

    /// Errors fail the run; warnings alone never do.
    pub fn verdict(&self) -> Verdict {
        if self.errors > 0 {
            Verdict::Fail
        } else if self.warnings > 0 {
            Verdict::Warn
        } else {
            Verdict::Pass
        }
    }

    pub fn data(&self) -> DepfenceData {
        DepfenceData {
            units_checked: self.units_checked,
            units_unconstrained: self.units_unconstrained,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}

/// Flatten results into report findings, ordered by unit then warnings before errors.
pub fn findings_from_results(results: &[CheckResult]) -> Vec<Finding> {
    let mut ordered: Vec<&CheckResult> = results.iter().collect();
    ordered.sort_by(|a, b| a.unit.cmp(&b.unit));

    ordered
        .into_iter()
        .flat_map(|r| r.violations())
        .map(|(severity, v)| Finding {
            severity,
            check_id: v.check_id.to_string(),
            code: v.code.to_string(),
            message: v.message.clone(),
            constraint: v.constraint.clone(),
            unit: v.unit.clone(),
            dependency: v.dependency.clone(),
            fingerprint: Some(fingerprint_for_violation(
                v.check_id,
                v.code,
                v.constraint.as_deref(),
                &v.unit,
                v.dependency.as_deref(),
            )),
        })
        .collect()
}
