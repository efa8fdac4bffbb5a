use serde::{Deserialize, Serialize};

/// Serialized import graph, for ecosystems whose loader runs outside depfence.
///
/// ```json
/// { "units": [ { "id": "cmd/foo", "platform": false, "imports": ["internal/bar", "fmt"] } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshotV1 {
    #[serde(default)]
    pub units: Vec<SnapshotUnit>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotUnit {
    pub id: String,

    /// Standard-library or platform unit; never checked against constraints.
    #[serde(default)]
    pub platform: bool,

    #[serde(default)]
    pub imports: Vec<String>,
}

pub fn parse_snapshot(text: &str) -> anyhow::Result<GraphSnapshotV1> {
    Ok(serde_json::from_str(text)?)
}
