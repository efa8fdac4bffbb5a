use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use toml_edit::DocumentMut;
use walkdir::{DirEntry, WalkDir};

/// Manifests that belong to a Cargo workspace, as paths relative to its root.
///
/// A root manifest without `[workspace]` is a single package and yields only `Cargo.toml`.
/// Otherwise `members` globs select member directories and `exclude` globs drop some of them.
/// The root manifest comes first, members follow sorted.
pub fn discover_manifests(repo_root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let root_manifest = repo_root.join("Cargo.toml");
    let text = std::fs::read_to_string(&root_manifest)
        .with_context(|| format!("read {root_manifest}"))?;
    let doc: DocumentMut = text.parse().context("parse root Cargo.toml")?;

    let mut manifests = vec![Utf8PathBuf::from("Cargo.toml")];
    let Some(workspace) = doc.get("workspace") else {
        return Ok(manifests);
    };
    let selector = MemberSelector::new(workspace)?;

    let mut members: Vec<Utf8PathBuf> = WalkDir::new(repo_root)
        .into_iter()
        .filter_entry(|e| !is_build_or_vcs_dir(e))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == "Cargo.toml")
        .filter_map(|e| relative_manifest(repo_root, &e))
        .filter(|rel| rel.as_str() != "Cargo.toml" && selector.selects(rel))
        .collect();
    members.sort();
    members.dedup();

    manifests.extend(members);
    Ok(manifests)
}

struct MemberSelector {
    /// No `members` key means every manifest below the root is a member.
    all: bool,
    members: GlobSet,
    exclude: GlobSet,
}

impl MemberSelector {
    fn new(workspace: &toml_edit::Item) -> anyhow::Result<Self> {
        let members = globs(workspace.get("members"));
        Ok(Self {
            all: members.is_empty(),
            members: build_globset(&members).context("compile members globset")?,
            exclude: build_globset(&globs(workspace.get("exclude")))
                .context("compile exclude globset")?,
        })
    }

    /// Globs name member directories, but `crates/*/Cargo.toml` forms are accepted too.
    fn selects(&self, manifest: &Utf8Path) -> bool {
        let dir = manifest.parent().map_or("", Utf8Path::as_str);
        let matches = |set: &GlobSet| set.is_match(manifest.as_str()) || set.is_match(dir);
        (self.all || matches(&self.members)) && !matches(&self.exclude)
    }
}

fn is_build_or_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_name() == "target" || entry.file_name() == ".git"
}

fn relative_manifest(repo_root: &Utf8Path, entry: &DirEntry) -> Option<Utf8PathBuf> {
    let abs = Utf8Path::from_path(entry.path())?;
    let rel = abs.strip_prefix(repo_root).unwrap_or(abs);
    Some(Utf8PathBuf::from(rel.as_str().replace('\\', "/")))
}

fn globs(item: Option<&toml_edit::Item>) -> Vec<String> {
    item.and_then(toml_edit::Item::as_array)
        .map(|array| {
            array
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
