//! Use case orchestration for depfence.
//!
//! Each use case coordinates the domain engine, the graph adapters and the renderers. The CLI
//! crate only parses arguments, performs file IO and maps results to exit codes.

#![forbid(unsafe_code)]

mod check;
mod cycles;
mod deps;
mod explain;
mod fanout;
mod info;
mod report;
mod source;
#[cfg(test)]
mod test_support;

pub use check::{CheckInput, CheckOutput, format_violations, run_check, verdict_exit_code};
pub use cycles::{FindCyclesInput, FindCyclesOutput, run_find_cycles};
pub use deps::{DepsInput, ListFormat, UNDEFINED_LABEL, run_graph, run_list};
pub use explain::{Dependent, WhoInput, format_chains, run_who, run_why};
pub use fanout::{DEFAULT_CONCURRENCY, Fanout, fan_out};
pub use info::{UnitInfo, format_info, run_info};
pub use report::{build_report, parse_report_json, serialize_report};
pub use source::{GraphSource, load_graph, load_policy_file};
