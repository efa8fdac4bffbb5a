//! The dependency-graph seam: adapters resolve units into trees, the engine only reads them.

use std::collections::BTreeMap;

/// `max_depth` value meaning "resolve the whole tree".
pub const UNLIMITED_DEPTH: usize = 0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),

    #[error("{0}")]
    Backend(String),
}

/// A resolved dependency tree rooted at one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepTree {
    pub id: String,
    /// Platform/standard-library units are never checked against constraints.
    pub platform: bool,
    pub children: Vec<DepTree>,
}

impl DepTree {
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            platform: false,
            children: Vec::new(),
        }
    }

    pub fn platform(id: impl Into<String>) -> Self {
        Self {
            platform: true,
            ..Self::leaf(id)
        }
    }

    pub fn node(id: impl Into<String>, children: Vec<DepTree>) -> Self {
        Self {
            children,
            ..Self::leaf(id)
        }
    }

    /// Ids of the direct dependencies, in tree order.
    pub fn direct_ids(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.id.as_str()).collect()
    }

    /// Every unit reachable from the root. The root itself is excluded, even when a cycle
    /// leads back to it.
    pub fn dependency_set(&self) -> DependencySet {
        let mut set = DependencySet::default();
        let mut stack: Vec<&DepTree> = self.children.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.id != self.id {
                set.insert(&node.id, node.platform);
            }
            stack.extend(node.children.iter().rev());
        }
        set
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dependency {
    pub id: String,
    pub platform: bool,
}

/// Directly and transitively reachable dependencies of a unit, keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencySet {
    deps: BTreeMap<String, bool>,
}

impl DependencySet {
    /// First insertion wins for the platform flag.
    pub fn insert(&mut self, id: &str, platform: bool) {
        self.deps.entry(id.to_string()).or_insert(platform);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.deps.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Dependency> + '_ {
        self.deps.iter().map(|(id, platform)| Dependency {
            id: id.clone(),
            platform: *platform,
        })
    }
}

impl<'a> FromIterator<(&'a str, bool)> for DependencySet {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        let mut set = DependencySet::default();
        for (id, platform) in iter {
            set.insert(id, platform);
        }
        set
    }
}

/// External collaborator that knows how units import each other.
///
/// Implementations must tolerate concurrent calls; the engine fans out over units.
pub trait DependencyGraph: Send + Sync {
    /// Resolve `unit` into a dependency tree. `max_depth == 0` means unlimited.
    fn resolve(&self, unit: &str, max_depth: usize) -> Result<DepTree, GraphError>;

    /// Units checked when the caller names none.
    fn units(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_set_is_transitive_and_excludes_root() {
        let tree = DepTree::node(
            "root",
            vec![
                DepTree::node("a", vec![DepTree::leaf("c"), DepTree::platform("fmt")]),
                DepTree::node("b", vec![DepTree::leaf("c"), DepTree::leaf("root")]),
            ],
        );
        let set = tree.dependency_set();
        let ids: Vec<String> = set.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "fmt"]);
        assert!(!set.contains("root"));
        assert!(set.iter().any(|d| d.id == "fmt" && d.platform));
    }

    #[test]
    fn direct_ids_only_lists_children() {
        let tree = DepTree::node("root", vec![DepTree::node("a", vec![DepTree::leaf("b")])]);
        assert_eq!(tree.direct_ids(), vec!["a"]);
    }
}
