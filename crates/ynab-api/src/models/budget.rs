use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel budget id meaning "the provider's most recently active
/// budget". An explicit id always overrides it.
pub const LAST_USED: &str = "last-used";

/// Top-level container under which every other resource is nested.
/// Read-only in this system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default = "default_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_month: Option<String>,
}

fn default_id() -> String {
    LAST_USED.to_string()
}

impl Budget {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
