use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::models::{month, Category, CategoryPatch};
use ynab_api::ops;
use ynab_api::{ApiResponse, Transport};

use crate::params::{budget_scope, opt_bool, opt_milliunits, opt_str, require_str};
use crate::{decoded_output, rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

fn category_object(params: &Value) -> Result<&Value> {
    params
        .get("category")
        .filter(|v| v.is_object())
        .ok_or_else(|| anyhow!("Missing required parameter: 'category'"))
}

/// Explicit per-field mapping so the outgoing patch carries exactly the
/// caller-set fields. Monetary fields accept raw milliunits or
/// `*_in_currency` values. A patch with no updatable fields is rejected
/// before any request is sent.
fn patch_from(category: &Value) -> Result<CategoryPatch> {
    let patch = CategoryPatch {
        name: opt_str(category, "name"),
        note: opt_str(category, "note"),
        category_group_id: opt_str(category, "category_group_id"),
        hidden: opt_bool(category, "hidden"),
        budgeted: opt_milliunits(category, "budgeted")?,
        goal_target: opt_milliunits(category, "goal_target")?,
    };
    if patch.is_empty() {
        return Err(anyhow!("No category fields to update"));
    }
    Ok(patch)
}

fn category_schema() -> Value {
    json!({
        "type": "object",
        "description": "Only the fields given here are sent; the server keeps its values for the rest",
        "properties": {
            "id": { "type": "string", "description": "Category to update" },
            "name": { "type": "string" },
            "note": { "type": "string" },
            "category_group_id": { "type": "string" },
            "hidden": { "type": "boolean" },
            "budgeted": { "type": "integer", "description": "Amount in milliunits" },
            "budgeted_in_currency": { "type": "number", "description": "Amount in currency units; rounded to the nearest milliunit" },
            "goal_target": { "type": "integer", "description": "Amount in milliunits" },
            "goal_target_in_currency": { "type": "number", "description": "Amount in currency units; rounded to the nearest milliunit" }
        },
        "required": ["id"]
    })
}

pub struct GetCategoriesTool {
    transport: Arc<dyn Transport>,
}

impl GetCategoriesTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetCategoriesTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_categories".to_string(),
            name: "Get Categories".to_string(),
            description: "Fetches all categories for a budget from the YNAB API, flattened \
                          across category groups"
                .to_string(),
            category: ToolCategory::Category,
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
        match ops::categories::list(self.transport.as_ref(), &scope).await? {
            ApiResponse::Success(decoded) => Ok(success(
                "get_categories",
                decoded_output(&decoded, Category::host_value)?,
            )),
            ApiResponse::Error(e) => Ok(rejection("get_categories", e)),
        }
    }
}

pub struct GetCategoryForMonthTool {
    transport: Arc<dyn Transport>,
}

impl GetCategoryForMonthTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetCategoryForMonthTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_category_for_month".to_string(),
            name: "Get Category for Month".to_string(),
            description: "Fetches a single category as budgeted for one month; without a \
                          category_id it falls back to the full category listing"
                .to_string(),
            category: ToolCategory::Category,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to read; defaults to the last-used budget"
                    },
                    "month": {
                        "type": "string",
                        "description": "ISO month, or the 'current' sentinel (default)"
                    },
                    "category_id": { "type": "string" }
                }
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let month = opt_str(&params, "month").unwrap_or_else(|| month::CURRENT.to_string());
        let decoded = match opt_str(&params, "category_id") {
            Some(category_id) => {
                ops::categories::get_for_month(self.transport.as_ref(), &scope, &month, &category_id)
                    .await?
            }
            None => ops::categories::list(self.transport.as_ref(), &scope).await?,
        };
        match decoded {
            ApiResponse::Success(decoded) => Ok(success(
                "get_category_for_month",
                decoded_output(&decoded, Category::host_value)?,
            )),
            ApiResponse::Error(e) => Ok(rejection("get_category_for_month", e)),
        }
    }
}

pub struct UpdateCategoryTool {
    transport: Arc<dyn Transport>,
}

impl UpdateCategoryTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for UpdateCategoryTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "update_category".to_string(),
            name: "Update Category".to_string(),
            description: "Updates a category in the YNAB API. Partial patch: only \
                          caller-supplied fields are sent."
                .to_string(),
            category: ToolCategory::Category,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to update; defaults to the last-used budget"
                    },
                    "category": category_schema()
                },
                "required": ["category"]
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let category = category_object(&params)?;
        let category_id = require_str(category, "id")?;
        let patch = patch_from(category)?;
        match ops::categories::update(self.transport.as_ref(), &scope, &category_id, None, &patch)
            .await?
        {
            ApiResponse::Success(category) => {
                Ok(success("update_category", category.host_value()?))
            }
            ApiResponse::Error(e) => Ok(rejection("update_category", e)),
        }
    }
}

pub struct UpdateCategoryForMonthTool {
    transport: Arc<dyn Transport>,
}

impl UpdateCategoryForMonthTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for UpdateCategoryForMonthTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "update_category_for_month".to_string(),
            name: "Update Category for Month".to_string(),
            description: "Updates a category for a specific month in the YNAB API. Partial \
                          patch: only caller-supplied fields are sent."
                .to_string(),
            category: ToolCategory::Category,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to update; defaults to the last-used budget"
                    },
                    "month": {
                        "type": "string",
                        "description": "ISO month, or the 'current' sentinel (default)"
                    },
                    "category": category_schema()
                },
                "required": ["category"]
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let month = opt_str(&params, "month").unwrap_or_else(|| month::CURRENT.to_string());
        let category = category_object(&params)?;
        let category_id = require_str(category, "id")?;
        let patch = patch_from(category)?;
        match ops::categories::update(
            self.transport.as_ref(),
            &scope,
            &category_id,
            Some(&month),
            &patch,
        )
        .await?
        {
            ApiResponse::Success(category) => Ok(success(
                "update_category_for_month",
                category.host_value()?,
            )),
            ApiResponse::Error(e) => Ok(rejection("update_category_for_month", e)),
        }
    }
}
