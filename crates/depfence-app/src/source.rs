//! Loading inputs: the policy file and the dependency graph.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use depfence_domain::Policy;
use depfence_repo::ImportGraph;
use depfence_settings::PolicyFormat;

/// Where the import relation comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphSource {
    /// A Cargo workspace root (directory containing the root `Cargo.toml`).
    Workspace(Utf8PathBuf),
    /// A JSON graph snapshot file.
    Snapshot(Utf8PathBuf),
}

pub fn load_graph(source: &GraphSource) -> anyhow::Result<ImportGraph> {
    match source {
        GraphSource::Workspace(root) => ImportGraph::from_cargo_workspace(root)
            .with_context(|| format!("load Cargo workspace at {root}")),
        GraphSource::Snapshot(path) => {
            let text =
                std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
            ImportGraph::from_snapshot_json(&text).with_context(|| format!("load {path}"))
        }
    }
}

/// Read and resolve a policy file; `.toml` selects TOML, anything else JSON.
pub fn load_policy_file(path: &Utf8Path) -> anyhow::Result<Policy> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read policy {path}"))?;
    let format = PolicyFormat::from_path(path.as_std_path());
    depfence_settings::load_policy(&text, format).with_context(|| format!("load policy {path}"))
}
