use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::ops;
use ynab_api::{ApiResponse, Transport};

use crate::{rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

pub struct GetUserTool {
    transport: Arc<dyn Transport>,
}

impl GetUserTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetUserTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_user".to_string(),
            name: "Get User".to_string(),
            description: "Fetches the authenticated user from the YNAB API".to_string(),
            category: ToolCategory::User,
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
            output_schema: json!({
                "type": "object",
                "properties": {
                    "id": { "type": "string" }
                }
            }),
        }
    }

    async fn execute(&self, _params: Value) -> Result<ToolResult> {
        match ops::user::get(self.transport.as_ref()).await? {
            ApiResponse::Success(user) => Ok(success("get_user", user.host_value()?)),
            ApiResponse::Error(e) => Ok(rejection("get_user", e)),
        }
    }
}
