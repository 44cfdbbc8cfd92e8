use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::models::Budget;
use ynab_api::ops;
use ynab_api::{ApiResponse, Transport};

use crate::{rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

pub struct GetBudgetsTool {
    transport: Arc<dyn Transport>,
}

impl GetBudgetsTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetBudgetsTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_budgets".to_string(),
            name: "Get Budgets".to_string(),
            description: "Fetches all budgets from the YNAB API".to_string(),
            category: ToolCategory::Budget,
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
            output_schema: json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "first_month": { "type": "string" },
                        "last_month": { "type": "string" }
                    }
                }
            }),
        }
    }

    async fn execute(&self, _params: Value) -> Result<ToolResult> {
        match ops::budgets::list(self.transport.as_ref()).await? {
            ApiResponse::Success(budgets) => {
                let output = budgets
                    .iter()
                    .map(Budget::host_value)
                    .collect::<serde_json::Result<Vec<_>>>()?;
                Ok(success("get_budgets", Value::Array(output)))
            }
            ApiResponse::Error(e) => Ok(rejection("get_budgets", e)),
        }
    }
}
