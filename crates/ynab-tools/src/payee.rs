use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::models::Payee;
use ynab_api::ops;
use ynab_api::{ApiResponse, Transport};

use crate::params::budget_scope;
use crate::{rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

pub struct GetPayeesTool {
    transport: Arc<dyn Transport>,
}

impl GetPayeesTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetPayeesTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_payees".to_string(),
            name: "Get Payees".to_string(),
            description: "Fetches payees for a budget from the YNAB API".to_string(),
            category: ToolCategory::Payee,
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
        match ops::payees::list(self.transport.as_ref(), &scope).await? {
            ApiResponse::Success(payees) => {
                let output = payees
                    .iter()
                    .map(Payee::host_value)
                    .collect::<serde_json::Result<Vec<_>>>()?;
                Ok(success("get_payees", Value::Array(output)))
            }
            ApiResponse::Error(e) => Ok(rejection("get_payees", e)),
        }
    }
}
