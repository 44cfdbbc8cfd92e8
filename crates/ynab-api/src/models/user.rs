use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The authenticated user, as returned by `/user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl User {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
