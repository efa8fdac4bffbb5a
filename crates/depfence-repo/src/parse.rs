use anyhow::Context;
use toml_edit::{DocumentMut, Item, Table};

/// A workspace package and the crates it imports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestUnit {
    pub name: String,
    /// Imported package names in manifest order, without duplicates.
    pub imports: Vec<String>,
}

/// Parse a Cargo manifest. Virtual manifests (no `[package]`) yield `None`.
pub fn parse_manifest(text: &str) -> anyhow::Result<Option<ManifestUnit>> {
    let doc = text
        .parse::<DocumentMut>()
        .context("parse Cargo.toml")?;

    let Some(name) = doc
        .get("package")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
    else {
        return Ok(None);
    };

    let mut imports = Vec::new();
    collect_dep_tables(doc.as_table(), &mut imports);

    // `[target.'cfg(unix)'.dependencies]` and friends.
    if let Some(targets) = doc.get("target").and_then(Item::as_table) {
        for (_, target) in targets.iter() {
            if let Some(target) = target.as_table() {
                collect_dep_tables(target, &mut imports);
            }
        }
    }

    Ok(Some(ManifestUnit {
        name: name.to_string(),
        imports,
    }))
}

fn collect_dep_tables(table: &Table, out: &mut Vec<String>) {
    for section in ["dependencies", "dev-dependencies", "build-dependencies"] {
        let Some(deps) = table.get(section).and_then(Item::as_table_like) else {
            continue;
        };
        for (key, item) in deps.iter() {
            let name = package_name(key, item);
            if !out.contains(&name) {
                out.push(name);
            }
        }
    }
}

/// `foo = { package = "bar" }` imports `bar`.
fn package_name(key: &str, item: &Item) -> String {
    item.as_table_like()
        .and_then(|t| t.get("package"))
        .and_then(Item::as_str)
        .unwrap_or(key)
        .to_string()
}
