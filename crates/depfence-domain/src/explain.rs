use crate::chain::{ChainItem, DependencyChain};
use crate::graph::DepTree;

/// Every path from `root` down to a node whose id equals `target`.
///
/// Paths are reported per traversal, so the same route reached through two branches shows up
/// twice. Descent stops at the first hit on each path.
pub fn explain(root: &DepTree, target: &str) -> Vec<DependencyChain> {
    let mut found = Vec::new();
    walk(root, &DependencyChain::new(), target, &mut found);
    found
}

fn walk(node: &DepTree, chain: &DependencyChain, target: &str, found: &mut Vec<DependencyChain>) {
    let chain = chain.with(ChainItem::raw(node.id.as_str()));
    if node.id == target {
        found.push(chain);
        return;
    }
    for child in &node.children {
        walk(child, &chain, target, found);
    }
}
