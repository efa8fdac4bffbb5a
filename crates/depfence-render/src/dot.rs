/// Render directed edges as a `strict digraph deps { ... }` document.
///
/// Ids that are not plain DOT identifiers are quoted.
pub fn render_dot<'a>(edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut out = String::from("strict digraph deps {\n");
    for (from, to) in edges {
        out.push_str(&format!("{} -> {}\n", dot_id(from), dot_id(to)));
    }
    out.push_str("}\n");
    out
}

fn dot_id(id: &str) -> String {
    let plain = id
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        return id.to_string();
    }
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
