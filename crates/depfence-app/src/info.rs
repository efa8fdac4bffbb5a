//! The `info` use case: which components and constraints apply to each unit.

use depfence_domain::{CanonicalConstraint, Policy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitInfo {
    pub unit: String,
    pub components: Vec<String>,
    pub constraints: Vec<CanonicalConstraint>,
}

pub fn run_info(policy: &Policy, units: &[String]) -> Vec<UnitInfo> {
    units
        .iter()
        .map(|unit| UnitInfo {
            unit: unit.clone(),
            components: policy
                .components_for_unit(unit)
                .into_iter()
                .map(str::to_string)
                .collect(),
            constraints: policy
                .applicable_constraints(unit)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect()
}

pub fn format_info(infos: &[UnitInfo]) -> String {
    let mut out = String::new();
    for info in infos {
        if info.constraints.is_empty() {
            out.push_str(&format!("No constraints for {}\n", info.unit));
            continue;
        }
        out.push_str(&format!("Constraints for {}:\n", info.unit));
        if !info.components.is_empty() {
            out.push_str(&format!("\tcomponents: {}\n", info.components.join(", ")));
        }
        for constraint in &info.constraints {
            for line in constraint.to_string().lines() {
                out.push_str(&format!("\t{line}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::layered_policy;

    #[test]
    fn lists_constraints_and_components() {
        let policy = layered_policy();
        let infos = run_info(&policy, &["cmd/app".to_string(), "vendor/x".to_string()]);

        assert_eq!(infos[0].components, vec!["cli"]);
        assert_eq!(infos[0].constraints.len(), 1);
        assert!(infos[1].constraints.is_empty());

        let text = format_info(&infos);
        assert!(text.starts_with("Constraints for cmd/app:\n\tcomponents: cli\n\tname:\tcli -x-> internal\n"));
        assert!(text.contains("\tkind:\tforbid\n"));
        assert!(text.contains("\tlevel:\terror\n"));
        assert!(text.ends_with("No constraints for vendor/x\n"));
    }
}
