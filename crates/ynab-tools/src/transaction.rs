use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use ynab_api::models::{Transaction, TransactionPayload};
use ynab_api::ops;
use ynab_api::ops::transactions::TransactionQuery;
use ynab_api::ops::BudgetScope;
use ynab_api::{ApiResponse, Transport};

use crate::params::{budget_scope, opt_bool, opt_milliunits, opt_str, require_str};
use crate::{decoded_output, rejection, success, Tool, ToolCategory, ToolMetadata, ToolResult};

fn transaction_object(params: &Value) -> Result<&Value> {
    params
        .get("transaction")
        .filter(|v| v.is_object())
        .ok_or_else(|| anyhow!("Missing required parameter: 'transaction'"))
}

/// Explicit per-field mapping so create/update bodies carry exactly the
/// caller-set fields.
fn payload_from(transaction: &Value) -> Result<TransactionPayload> {
    Ok(TransactionPayload {
        account_id: opt_str(transaction, "account_id"),
        date: opt_str(transaction, "date"),
        amount: opt_milliunits(transaction, "amount")?,
        payee_id: opt_str(transaction, "payee_id"),
        payee_name: opt_str(transaction, "payee_name"),
        category_id: opt_str(transaction, "category_id"),
        memo: opt_str(transaction, "memo"),
        cleared: opt_str(transaction, "cleared"),
        approved: opt_bool(transaction, "approved"),
        import_id: opt_str(transaction, "import_id"),
    })
}

fn transaction_schema() -> Value {
    json!({
        "type": "object",
        "description": "Only the fields given here are sent; the server keeps its values for the rest",
        "properties": {
            "id": { "type": "string" },
            "account_id": { "type": "string" },
            "date": { "type": "string", "description": "ISO date" },
            "amount": { "type": "integer", "description": "Amount in milliunits (1000 = 1.00)" },
            "amount_in_currency": { "type": "number", "description": "Amount in currency units; rounded to the nearest milliunit" },
            "payee_id": { "type": "string" },
            "payee_name": { "type": "string" },
            "category_id": { "type": "string" },
            "memo": { "type": "string" },
            "cleared": { "type": "string", "enum": ["cleared", "uncleared", "reconciled"] },
            "approved": { "type": "boolean" },
            "import_id": { "type": "string" }
        }
    })
}

fn read_input_schema(selector: Option<(&str, &str)>, with_since: bool) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "budget_id".to_string(),
        json!({
            "type": "string",
            "description": "Budget to read; defaults to the last-used budget"
        }),
    );
    if let Some((key, description)) = selector {
        properties.insert(key.to_string(), json!({ "type": "string", "description": description }));
    }
    if with_since {
        properties.insert(
            "since".to_string(),
            json!({
                "type": "string",
                "description": "Only return transactions on or after this ISO date"
            }),
        );
    }
    json!({ "type": "object", "properties": properties })
}

/// Shared read path for every transaction query variant.
async fn run_get(
    transport: &dyn Transport,
    tool_id: &str,
    scope: &BudgetScope,
    query: &TransactionQuery,
) -> Result<ToolResult> {
    match ops::transactions::get(transport, scope, query).await? {
        ApiResponse::Success(decoded) => Ok(success(
            tool_id,
            decoded_output(&decoded, Transaction::host_value)?,
        )),
        ApiResponse::Error(e) => Ok(rejection(tool_id, e)),
    }
}

pub struct GetAllTransactionsTool {
    transport: Arc<dyn Transport>,
}

impl GetAllTransactionsTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetAllTransactionsTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_all_transactions".to_string(),
            name: "Get All Transactions".to_string(),
            description: "Fetches all transactions for a budget from the YNAB API".to_string(),
            category: ToolCategory::Transaction,
            input_schema: read_input_schema(None, true),
            output_schema: json!({ "type": "array", "items": { "type": "object" } }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let query = TransactionQuery {
            since: opt_str(&params, "since"),
            ..TransactionQuery::default()
        };
        run_get(
            self.transport.as_ref(),
            "get_all_transactions",
            &scope,
            &query,
        )
        .await
    }
}

pub struct GetTransactionTool {
    transport: Arc<dyn Transport>,
}

impl GetTransactionTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetTransactionTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_transaction".to_string(),
            name: "Get Transaction".to_string(),
            description: "Fetches a single transaction by id from the YNAB API".to_string(),
            category: ToolCategory::Transaction,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to read; defaults to the last-used budget"
                    },
                    "transaction_id": { "type": "string" }
                },
                "required": ["transaction_id"]
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let query = TransactionQuery {
            transaction_id: Some(require_str(&params, "transaction_id")?),
            ..TransactionQuery::default()
        };
        run_get(self.transport.as_ref(), "get_transaction", &scope, &query).await
    }
}

pub struct GetTransactionsForCategoryTool {
    transport: Arc<dyn Transport>,
}

impl GetTransactionsForCategoryTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetTransactionsForCategoryTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_transactions_for_category".to_string(),
            name: "Get Transactions for Category".to_string(),
            description: "Fetches transactions for a specific category from the YNAB API"
                .to_string(),
            category: ToolCategory::Transaction,
            input_schema: read_input_schema(
                Some(("category_id", "Category to narrow the read to")),
                true,
            ),
            output_schema: json!({ "type": "array", "items": { "type": "object" } }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let query = TransactionQuery {
            category_id: opt_str(&params, "category_id"),
            since: opt_str(&params, "since"),
            ..TransactionQuery::default()
        };
        run_get(
            self.transport.as_ref(),
            "get_transactions_for_category",
            &scope,
            &query,
        )
        .await
    }
}

pub struct GetTransactionsForAccountTool {
    transport: Arc<dyn Transport>,
}

impl GetTransactionsForAccountTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetTransactionsForAccountTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_transactions_for_account".to_string(),
            name: "Get Transactions for Account".to_string(),
            description: "Fetches transactions for a specific account from the YNAB API"
                .to_string(),
            category: ToolCategory::Transaction,
            input_schema: read_input_schema(
                Some(("account_id", "Account to narrow the read to")),
                true,
            ),
            output_schema: json!({ "type": "array", "items": { "type": "object" } }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let query = TransactionQuery {
            account_id: opt_str(&params, "account_id"),
            since: opt_str(&params, "since"),
            ..TransactionQuery::default()
        };
        run_get(
            self.transport.as_ref(),
            "get_transactions_for_account",
            &scope,
            &query,
        )
        .await
    }
}

pub struct GetTransactionsForMonthTool {
    transport: Arc<dyn Transport>,
}

impl GetTransactionsForMonthTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetTransactionsForMonthTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_transactions_for_month".to_string(),
            name: "Get Transactions for Month".to_string(),
            description: "Fetches transactions for a specific month from the YNAB API"
                .to_string(),
            category: ToolCategory::Transaction,
            input_schema: read_input_schema(
                Some(("month", "ISO month, or the 'current' sentinel")),
                false,
            ),
            output_schema: json!({ "type": "array", "items": { "type": "object" } }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let query = TransactionQuery {
            month: opt_str(&params, "month"),
            ..TransactionQuery::default()
        };
        run_get(
            self.transport.as_ref(),
            "get_transactions_for_month",
            &scope,
            &query,
        )
        .await
    }
}

pub struct GetTransactionsForPayeeTool {
    transport: Arc<dyn Transport>,
}

impl GetTransactionsForPayeeTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for GetTransactionsForPayeeTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "get_transactions_for_payee".to_string(),
            name: "Get Transactions for Payee".to_string(),
            description: "Fetches transactions for a specific payee from the YNAB API"
                .to_string(),
            category: ToolCategory::Transaction,
            input_schema: read_input_schema(
                Some(("payee_id", "Payee to narrow the read to")),
                true,
            ),
            output_schema: json!({ "type": "array", "items": { "type": "object" } }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let query = TransactionQuery {
            payee_id: opt_str(&params, "payee_id"),
            since: opt_str(&params, "since"),
            ..TransactionQuery::default()
        };
        run_get(
            self.transport.as_ref(),
            "get_transactions_for_payee",
            &scope,
            &query,
        )
        .await
    }
}

pub struct NewTransactionTool {
    transport: Arc<dyn Transport>,
}

impl NewTransactionTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for NewTransactionTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "new_transaction".to_string(),
            name: "New Transaction".to_string(),
            description: "Creates a new transaction in the YNAB API".to_string(),
            category: ToolCategory::Transaction,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to create in; defaults to the last-used budget"
                    },
                    "transaction": transaction_schema()
                },
                "required": ["transaction"]
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let payload = payload_from(transaction_object(&params)?)?;
        match ops::transactions::create(self.transport.as_ref(), &scope, &payload).await? {
            ApiResponse::Success(transaction) => {
                Ok(success("new_transaction", transaction.host_value()?))
            }
            ApiResponse::Error(e) => Ok(rejection("new_transaction", e)),
        }
    }
}

pub struct UpdateTransactionTool {
    transport: Arc<dyn Transport>,
}

impl UpdateTransactionTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for UpdateTransactionTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "update_transaction".to_string(),
            name: "Update Transaction".to_string(),
            description: "Updates a transaction in the YNAB API. Partial patch: only \
                          caller-supplied fields are sent."
                .to_string(),
            category: ToolCategory::Transaction,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to update; defaults to the last-used budget"
                    },
                    "transaction": transaction_schema()
                },
                "required": ["transaction"]
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let transaction = transaction_object(&params)?;
        let transaction_id = require_str(transaction, "id")?;
        let payload = payload_from(transaction)?;
        match ops::transactions::update(self.transport.as_ref(), &scope, &transaction_id, &payload)
            .await?
        {
            ApiResponse::Success(transaction) => {
                Ok(success("update_transaction", transaction.host_value()?))
            }
            ApiResponse::Error(e) => Ok(rejection("update_transaction", e)),
        }
    }
}

pub struct DeleteTransactionTool {
    transport: Arc<dyn Transport>,
}

impl DeleteTransactionTool {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Tool for DeleteTransactionTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            id: "delete_transaction".to_string(),
            name: "Delete Transaction".to_string(),
            description: "Deletes a transaction in the YNAB API and returns its last known \
                          state"
                .to_string(),
            category: ToolCategory::Transaction,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "budget_id": {
                        "type": "string",
                        "description": "Budget to delete from; defaults to the last-used budget"
                    },
                    "transaction_id": { "type": "string" }
                },
                "required": ["transaction_id"]
            }),
            output_schema: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, params: Value) -> Result<ToolResult> {
        let scope = budget_scope(&params);
        let transaction_id = require_str(&params, "transaction_id")?;
        match ops::transactions::delete(self.transport.as_ref(), &scope, &transaction_id).await? {
            ApiResponse::Success(transaction) => {
                Ok(success("delete_transaction", transaction.host_value()?))
            }
            ApiResponse::Error(e) => Ok(rejection("delete_transaction", e)),
        }
    }
}
