use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use ynab_api::{ApiError, ApiResponse, ClientError, HttpMethod, Transport};
use ynab_tools::registry::create_tool_manager;
use ynab_tools::ToolStatus;

#[derive(Debug, Clone)]
struct RecordedCall {
    method: HttpMethod,
    path: String,
    body: Option<Value>,
}

struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<Vec<Result<ApiResponse<Value>, ClientError>>>,
}

impl MockTransport {
    fn with_data(data: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(vec![Ok(ApiResponse::Success(data))]),
        })
    }

    fn with_rejection(id: &str, name: &str, detail: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(vec![Ok(ApiResponse::Error(ApiError {
                id: id.to_string(),
                name: name.to_string(),
                detail: detail.to_string(),
            }))]),
        })
    }

    fn with_fault(fault: ClientError) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(vec![Err(fault)]),
        })
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse<Value>, ClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "no canned response for {path}");
        responses.remove(0)
    }
}

#[test]
fn registry_registers_every_tool() {
    let mock = MockTransport::with_data(json!({}));
    let manager = create_tool_manager(mock);
    let ids: Vec<_> = manager
        .metadata()
        .into_iter()
        .map(|metadata| metadata.id)
        .collect();
    assert_eq!(manager.len(), 18);
    for expected in [
        "get_user",
        "get_budgets",
        "get_accounts",
        "get_categories",
        "get_category_for_month",
        "update_category",
        "update_category_for_month",
        "get_months",
        "get_payees",
        "get_all_transactions",
        "get_transaction",
        "get_transactions_for_category",
        "get_transactions_for_account",
        "get_transactions_for_month",
        "get_transactions_for_payee",
        "new_transaction",
        "update_transaction",
        "delete_transaction",
    ] {
        assert!(ids.iter().any(|id| id == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn get_budgets_serializes_the_decoded_models() {
    let mock = MockTransport::with_data(json!({
        "budgets": [{
            "id": "b1",
            "name": "My Budget",
            "first_month": "2024-01-01",
            "last_month": "2024-12-01"
        }]
    }));
    let manager = create_tool_manager(mock.clone());

    let result = manager
        .execute_tool("get_budgets", json!({}))
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(
        result.output,
        json!([{
            "id": "b1",
            "name": "My Budget",
            "first_month": "2024-01-01",
            "last_month": "2024-12-01"
        }])
    );
    assert_eq!(mock.calls()[0].path, "/budgets");
}

#[tokio::test]
async fn get_accounts_reports_derived_currency_fields() {
    let mock = MockTransport::with_data(json!({
        "accounts": [{"id": "a1", "balance": -12_340}]
    }));
    let manager = create_tool_manager(mock.clone());

    let result = manager
        .execute_tool("get_accounts", json!({"budget_id": "b1"}))
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.output[0]["balance"], json!(-12_340));
    assert_eq!(result.output[0]["balance_in_currency"], json!(-12.34));
    assert_eq!(mock.calls()[0].path, "/budgets/b1/accounts");
}

#[tokio::test]
async fn provider_rejection_becomes_a_normal_failure_result() {
    let mock = MockTransport::with_rejection("401", "unauthorized", "bad token");
    let manager = create_tool_manager(mock);

    let result = manager
        .execute_tool("get_budgets", json!({}))
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Failure);
    assert_eq!(result.output["error"]["id"], "401");
    assert_eq!(result.output["error"]["name"], "unauthorized");
    assert_eq!(result.output["error"]["detail"], "bad token");
}

#[tokio::test]
async fn contract_violations_fault_instead_of_returning_data() {
    let mock = MockTransport::with_fault(ClientError::UnexpectedFormat(
        "no budgets key in response data".to_string(),
    ));
    let manager = create_tool_manager(mock);

    let result = manager.execute_tool("get_budgets", json!({})).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn update_category_sends_exactly_the_caller_set_fields() {
    let mock = MockTransport::with_data(json!({
        "category": {"id": "c1", "note": "x"}
    }));
    let manager = create_tool_manager(mock.clone());

    let result = manager
        .execute_tool(
            "update_category",
            json!({"category": {"id": "c1", "note": "x"}}),
        )
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);

    let calls = mock.calls();
    assert_eq!(calls[0].method, HttpMethod::Put);
    assert_eq!(calls[0].path, "/budgets/last-used/categories/c1");
    assert_eq!(
        calls[0].body.as_ref().unwrap(),
        &json!({"category": {"note": "x"}})
    );
}

#[tokio::test]
async fn update_category_rejects_a_patch_with_no_fields() {
    let mock = MockTransport::with_data(json!({"category": {"id": "c1"}}));
    let manager = create_tool_manager(mock.clone());

    let result = manager
        .execute_tool("update_category", json!({"category": {"id": "c1"}}))
        .await;
    assert!(result.is_err());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn update_category_for_month_defaults_to_the_current_sentinel() {
    let mock = MockTransport::with_data(json!({"category": {"id": "c1"}}));
    let manager = create_tool_manager(mock.clone());

    manager
        .execute_tool(
            "update_category_for_month",
            json!({"category": {"id": "c1", "budgeted_in_currency": 25.0}}),
        )
        .await
        .unwrap();

    let calls = mock.calls();
    assert_eq!(
        calls[0].path,
        "/budgets/last-used/months/current/categories/c1"
    );
    assert_eq!(
        calls[0].body.as_ref().unwrap(),
        &json!({"category": {"budgeted": 25_000}})
    );
}

#[tokio::test]
async fn get_transactions_for_category_narrows_the_path() {
    let mock = MockTransport::with_data(json!({"transactions": []}));
    let manager = create_tool_manager(mock.clone());

    manager
        .execute_tool(
            "get_transactions_for_category",
            json!({"category_id": "cid", "since": "2024-01-01"}),
        )
        .await
        .unwrap();
    assert_eq!(
        mock.calls()[0].path,
        "/budgets/last-used/categories/cid/transactions?since=2024-01-01"
    );
}

#[tokio::test]
async fn new_transaction_accepts_currency_amounts() {
    let mock = MockTransport::with_data(json!({
        "transaction": {"id": "t9", "amount": -4_251, "account_id": "a1"}
    }));
    let manager = create_tool_manager(mock.clone());

    let result = manager
        .execute_tool(
            "new_transaction",
            json!({"transaction": {
                "account_id": "a1",
                "date": "2024-03-14",
                "amount_in_currency": -4.2506
            }}),
        )
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.output["amount_in_currency"], json!(-4.251));

    let calls = mock.calls();
    assert_eq!(calls[0].method, HttpMethod::Post);
    assert_eq!(calls[0].path, "/budgets/last-used/transactions");
    assert_eq!(
        calls[0].body.as_ref().unwrap(),
        &json!({"transaction": {
            "account_id": "a1",
            "date": "2024-03-14",
            "amount": -4_251
        }})
    );
}

#[tokio::test]
async fn update_transaction_requires_the_transaction_id() {
    let mock = MockTransport::with_data(json!({"transaction": {"id": "t1"}}));
    let manager = create_tool_manager(mock);

    let result = manager
        .execute_tool("update_transaction", json!({"transaction": {"memo": "m"}}))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn delete_transaction_returns_the_last_known_state() {
    let mock = MockTransport::with_data(json!({
        "transaction": {"id": "t1", "deleted": true, "amount": -1_000}
    }));
    let manager = create_tool_manager(mock.clone());

    let result = manager
        .execute_tool("delete_transaction", json!({"transaction_id": "t1"}))
        .await
        .unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.output["deleted"], json!(true));
    assert_eq!(result.output["amount_in_currency"], json!(-1.0));
    assert_eq!(mock.calls()[0].method, HttpMethod::Delete);
    assert_eq!(mock.calls()[0].path, "/budgets/last-used/transactions/t1");
}

#[tokio::test]
async fn get_user_returns_the_singular_resource() {
    let mock = MockTransport::with_data(json!({"user": {"id": "u1"}}));
    let manager = create_tool_manager(mock);

    let result = manager.execute_tool("get_user", json!({})).await.unwrap();
    assert_eq!(result.status, ToolStatus::Success);
    assert_eq!(result.output, json!({"id": "u1"}));
}
