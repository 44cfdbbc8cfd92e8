use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::models::Account;
use ynab_api::ops;
use ynab_api::{ApiResponse, Transport};

use crate::params::budget_scope;
use crate::{rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

pub struct GetAccountsTool {
    transport: Arc<dyn Transport>,
}

impl GetAccountsTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetAccountsTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_accounts".to_string(),
            name: "Get Accounts".to_string(),
            description: "Fetches accounts for a budget from the YNAB API. Balances are \
                          reported both in raw milliunits and in currency units."
                .to_string(),
            category: ToolCategory::Account,
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
        match ops::accounts::list(self.transport.as_ref(), &scope).await? {
            ApiResponse::Success(accounts) => {
                let output = accounts
                    .iter()
                    .map(Account::host_value)
                    .collect::<serde_json::Result<Vec<_>>>()?;
                Ok(success("get_accounts", Value::Array(output)))
            }
            ApiResponse::Error(e) => Ok(rejection("get_accounts", e)),
        }
    }
}
