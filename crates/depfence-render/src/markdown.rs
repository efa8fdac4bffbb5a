use depfence_types::{DepfenceReport, Severity, Verdict};

pub fn render_markdown(report: &DepfenceReport) -> String {
    let mut out = String::new();

    out.push_str("# Depfence report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    };
    let data = &report.data;
    out.push_str(&format!(
        "- Verdict: **{verdict}**\n- Units: {} checked, {} without constraints\n- Violations: {} error(s), {} warning(s)\n\n",
        data.units_checked, data.units_unconstrained, data.errors, data.warnings
    ));

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for f in &report.findings {
        let sev = match f.severity {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };
        out.push_str(&format!("- [{sev}] `{}` / `{}`: {}\n", f.check_id, f.code, f.message));
        if let Some(constraint) = &f.constraint {
            out.push_str(&format!("  - constraint: {constraint}\n"));
        }
    }

    out
}
