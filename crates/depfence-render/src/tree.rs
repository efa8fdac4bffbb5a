use depfence_domain::DepTree;

const PADDING: &str = "│ ";
const PREFIX: &str = "├ ";
const PREFIX_LAST: &str = "└ ";

/// One id per line, depth first.
pub fn render_plain(tree: &DepTree) -> String {
    let mut out = String::new();
    write_plain(&mut out, tree);
    out
}

fn write_plain(out: &mut String, node: &DepTree) {
    out.push_str(&node.id);
    out.push('\n');
    for child in &node.children {
        write_plain(out, child);
    }
}

/// Box-drawing tree, root first.
pub fn render_tree(tree: &DepTree) -> String {
    let mut out = String::new();
    out.push_str(&tree.id);
    out.push('\n');
    write_children(&mut out, tree, &mut Vec::new());
    out
}

// `open[i]` tells whether the ancestor at depth `i + 1` still has siblings below it.
fn write_children(out: &mut String, node: &DepTree, open: &mut Vec<bool>) {
    let count = node.children.len();
    for (idx, child) in node.children.iter().enumerate() {
        let last = idx + 1 == count;
        out.push(' ');
        for &is_open in open.iter() {
            out.push_str(if is_open { PADDING } else { "  " });
        }
        out.push_str(if last { PREFIX_LAST } else { PREFIX });
        out.push_str(&child.id);
        out.push('\n');

        open.push(!last);
        write_children(out, child, open);
        open.pop();
    }
}
