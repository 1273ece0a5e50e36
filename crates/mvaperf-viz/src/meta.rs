use serde::{Deserialize, Serialize};

/// Producer stamp carried by every artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Always `mvaperf`
    pub tool: String,
    /// Workspace version that wrote the artifact
    pub tool_version: String,
}

impl Default for ArtifactMeta {
    fn default() -> Self {
        Self { tool: "mvaperf".to_string(), tool_version: mvaperf_core::VERSION.to_string() }
    }
}
