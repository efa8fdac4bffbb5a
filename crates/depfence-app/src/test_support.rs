use depfence_domain::Policy;
use depfence_repo::ImportGraph;
use depfence_settings::{PolicyFormat, load_policy};

pub const LAYERED_POLICY: &str = r#"{
    "components": { "cli": "cmd/", "internal": "internal/", "util": "pkg/" },
    "constraints": [
        { "name": "cli -x-> internal", "scope": "cli", "kind": "forbid", "deps": "internal", "onBreak": "error" },
        { "name": "internal stays inside", "scope": "internal", "kind": "allow", "deps": "internal util", "onBreak": "warn" }
    ]
}"#;

/// `cmd/app -> pkg/util -> internal/db`, `internal/store -> internal/db, fmt, ext/log`.
pub const LAYERED_GRAPH: &str = r#"{
    "units": [
        { "id": "cmd/app", "imports": ["pkg/util"] },
        { "id": "pkg/util", "imports": ["internal/db"] },
        { "id": "internal/store", "imports": ["internal/db", "fmt", "ext/log"] },
        { "id": "internal/db", "imports": ["fmt"] },
        { "id": "fmt", "platform": true }
    ]
}"#;

pub fn layered_policy() -> Policy {
    load_policy(LAYERED_POLICY, PolicyFormat::Json).expect("layered policy")
}

pub fn layered_graph() -> ImportGraph {
    ImportGraph::from_snapshot_json(LAYERED_GRAPH).expect("layered graph")
}
