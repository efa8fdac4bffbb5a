//! Dependency graph adapters: JSON graph snapshots and Cargo workspaces.
//!
//! This crate is allowed to do filesystem IO. It never spawns external processes; ecosystems
//! that need a native loader export a snapshot instead.

#![forbid(unsafe_code)]

mod discover;
mod parse;
mod snapshot;

use anyhow::Context;
use camino::Utf8Path;
use depfence_domain::{DepTree, DependencyGraph, GraphError, UNLIMITED_DEPTH};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};

pub use discover::discover_manifests;
pub use parse::ManifestUnit;
pub use snapshot::{GraphSnapshotV1, SnapshotUnit};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    /// Parse arbitrary text as a Cargo manifest. **Never panics** on any input.
    pub fn parse_manifest(text: &str) -> anyhow::Result<()> {
        let _ = super::parse::parse_manifest(text)?;
        Ok(())
    }

    /// Parse arbitrary text as a graph snapshot and resolve every unit. **Never panics**.
    pub fn parse_snapshot(text: &str) -> anyhow::Result<()> {
        use depfence_domain::DependencyGraph;

        let graph = super::ImportGraph::from_snapshot_json(text)?;
        for unit in graph.units() {
            let _ = graph.resolve(&unit, 4);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct UnitNode {
    platform: bool,
    imports: Vec<String>,
}

/// In-memory import relation between units, resolvable into [`DepTree`]s.
///
/// Read-only after construction, so concurrent `resolve` calls need no locking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportGraph {
    units: BTreeMap<String, UnitNode>,
}

impl ImportGraph {
    pub fn from_snapshot(snapshot: GraphSnapshotV1) -> Self {
        let units = snapshot
            .units
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    UnitNode {
                        platform: u.platform,
                        imports: u.imports,
                    },
                )
            })
            .collect();
        Self { units }
    }

    pub fn from_snapshot_json(text: &str) -> anyhow::Result<Self> {
        let snapshot = snapshot::parse_snapshot(text).context("parse graph snapshot")?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Build the graph of a Cargo workspace: units are package names, edges are declared
    /// dependencies of every kind.
    pub fn from_cargo_workspace(repo_root: &Utf8Path) -> anyhow::Result<Self> {
        let manifests = discover::discover_manifests(repo_root).context("discover manifests")?;

        let parsed = manifests
            .par_iter()
            .map(|rel| {
                let abs = repo_root.join(rel);
                let text =
                    std::fs::read_to_string(&abs).with_context(|| format!("read {abs}"))?;
                parse::parse_manifest(&text).with_context(|| format!("parse {rel}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let units = parsed
            .into_iter()
            .flatten()
            .map(|unit| {
                (
                    unit.name,
                    UnitNode {
                        platform: false,
                        imports: unit.imports,
                    },
                )
            })
            .collect();
        Ok(Self { units })
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.units.contains_key(unit)
    }

    /// Each unit is expanded at most once per tree; later occurrences stay leaves. This also
    /// cuts import cycles, since a unit on the current path is already expanded.
    fn build(
        &self,
        id: &str,
        depth: usize,
        max_depth: usize,
        expanded: &mut HashSet<String>,
    ) -> DepTree {
        let Some(node) = self.units.get(id) else {
            return DepTree::leaf(id);
        };

        let mut tree = DepTree {
            id: id.to_string(),
            platform: node.platform,
            children: Vec::new(),
        };

        let depth_left = max_depth == UNLIMITED_DEPTH || depth < max_depth;
        if !depth_left || !expanded.insert(id.to_string()) {
            return tree;
        }

        tree.children = node
            .imports
            .iter()
            .map(|dep| self.build(dep, depth + 1, max_depth, expanded))
            .collect();
        tree
    }
}

impl DependencyGraph for ImportGraph {
    fn resolve(&self, unit: &str, max_depth: usize) -> Result<DepTree, GraphError> {
        if !self.units.contains_key(unit) {
            return Err(GraphError::UnknownUnit(unit.to_string()));
        }
        Ok(self.build(unit, 0, max_depth, &mut HashSet::new()))
    }

    /// Non-platform units in name order.
    fn units(&self) -> Vec<String> {
        self.units
            .iter()
            .filter(|(_, node)| !node.platform)
            .map(|(id, _)| id.clone())
            .collect()
    }
}
