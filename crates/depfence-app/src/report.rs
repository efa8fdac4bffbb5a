use anyhow::Context;
use depfence_domain::{CheckResult, CheckSummary, findings_from_results};
use depfence_types::{DepfenceReport, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

pub fn build_report(
    results: &[CheckResult],
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> DepfenceReport {
    let summary = CheckSummary::from_results(results);
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "depfence".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        verdict: summary.verdict(),
        findings: findings_from_results(results),
        data: summary.data(),
    }
}

pub fn serialize_report(report: &DepfenceReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<DepfenceReport> {
    serde_json::from_str(text).context("parse depfence report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use depfence_types::Verdict;

    #[test]
    fn empty_run_passes_and_round_trips() {
        let now = OffsetDateTime::now_utc();
        let report = build_report(&[], now, now);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.schema, SCHEMA_REPORT_V1);

        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        let back = parse_report_json(&text).expect("parse");
        assert_eq!(back.data, report.data);
        assert_eq!(back.tool.name, "depfence");
    }
}
