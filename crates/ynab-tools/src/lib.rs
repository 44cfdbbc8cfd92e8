use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

use ynab_api::ops::Decoded;
use ynab_api::ApiError;

pub mod account;
pub mod budget;
pub mod category;
pub mod month;
pub mod params;
pub mod payee;
pub mod registry;
pub mod transaction;
pub mod user;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCategory {
    Budget,
    Account,
    Category,
    Month,
    Payee,
    Transaction,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: ToolCategory,
    pub input_schema: Value,
    pub output_schema: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_id: String,
    pub status: ToolStatus,
    pub output: Value,
    pub error: Option<String>,
}

/// One callable per resource operation. Tools marshal host arguments
/// into domain values, invoke the matching operation, and serialize the
/// result; every behavioral decision lives in the operations layer.
#[async_trait]
pub trait Tool: Send + Sync {
    fn metadata(&self) -> ToolMetadata;
    async fn execute(&self, params: Value) -> Result<ToolResult>;
}

pub struct ToolManager {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register_tool(&mut self, tool: Box<dyn Tool>) {
        let metadata = tool.metadata();
        self.tools.insert(metadata.id.clone(), tool);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Metadata of every registered tool, sorted by id for stable
    /// listings.
    pub fn metadata(&self) -> Vec<ToolMetadata> {
        let mut all: Vec<_> = self.tools.values().map(|tool| tool.metadata()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub async fn execute_tool(&self, tool_id: &str, params: Value) -> Result<ToolResult> {
        if let Some(tool) = self.tools.get(tool_id) {
            debug!(tool = tool_id, "executing tool");
            tool.execute(params).await
        } else {
            warn!(tool = tool_id, "unknown tool requested");
            Ok(ToolResult {
                tool_id: tool_id.to_string(),
                status: ToolStatus::Failure,
                output: Value::Null,
                error: Some(format!("Tool '{}' not found", tool_id)),
            })
        }
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn success(tool_id: &str, output: Value) -> ToolResult {
    ToolResult {
        tool_id: tool_id.to_string(),
        status: ToolStatus::Success,
        output,
        error: None,
    }
}

/// Provider rejections are data: the host sees a normal result carrying
/// the three error fields, never a fault.
pub(crate) fn rejection(tool_id: &str, error: ApiError) -> ToolResult {
    let message = format!("{}: {}", error.name, error.detail);
    ToolResult {
        tool_id: tool_id.to_string(),
        status: ToolStatus::Failure,
        output: json!({ "error": error }),
        error: Some(message),
    }
}

pub(crate) fn decoded_output<T>(
    decoded: &Decoded<T>,
    to_value: fn(&T) -> serde_json::Result<Value>,
) -> serde_json::Result<Value> {
    match decoded {
        Decoded::One(item) => to_value(item),
        Decoded::Many(items) => Ok(Value::Array(
            items
                .iter()
                .map(to_value)
                .collect::<serde_json::Result<Vec<_>>>()?,
        )),
    }
}
