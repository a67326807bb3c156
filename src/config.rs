use serde::{Deserialize, Serialize};

/// What a critical-path analyzer reports when several chains end on the same
/// latest date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Only the winning chain (longest, then first in input order).
    Single,
    /// Every chain ending on the latest date.
    Union,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub project_ties: TiePolicy,
    pub task_ties: TiePolicy,
}

impl Default for EngineConfig {
    /// Projects keep a single chain; parallel WBS branches are all highlighted.
    fn default() -> Self {
        Self {
            project_ties: TiePolicy::Single,
            task_ties: TiePolicy::Union,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
