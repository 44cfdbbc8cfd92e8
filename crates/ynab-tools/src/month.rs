use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::models::Month;
use ynab_api::ops;
use ynab_api::{ApiResponse, Transport};

use crate::params::budget_scope;
use crate::{rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

pub struct GetMonthsTool {
    transport: Arc<dyn Transport>,
}

impl GetMonthsTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetMonthsTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_months".to_string(),
            name: "Get Months".to_string(),
            description: "Fetches budget months from the YNAB API".to_string(),
            category: ToolCategory::Month,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to read; defaults to the last-used budget"
                    }
                }
            }),
            output_schema: json!({
                "type": "array",
                "items": { "type": "object" }
            }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        match ops::months::list(self.transport.as_ref(), &scope).await? {
            ApiResponse::Success(months) => {
                let output = months
                    .iter()
                    .map(Month::host_value)
                    .collect::<serde_json::Result<Vec<_>>>()?;
                Ok(success("get_months", Value::Array(output)))
            }
            ApiResponse::Error(e) => Ok(rejection("get_months", e)),
        }
    }
}
