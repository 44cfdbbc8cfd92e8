use serde_json::json;

use crate::client::{ApiResponse, HttpMethod, Transport};
use crate::error::ClientError;
use crate::models::{Category, CategoryPatch};

use super::{decode, decode_single, BudgetScope, Decoded, ResponseKeys};

const KEYS: ResponseKeys = ResponseKeys {
    singular: "category",
    grouped: Some(("category_groups", "categories")),
    collection: "categories",
};

/// All categories in the budget. The provider nests them in groups;
/// decoding flattens to a plain collection.
pub async fn list(
    transport: &dyn Transport,
    scope: &BudgetScope,
) -> Result<ApiResponse<Decoded<Category>>, ClientError> {
    let path = format!("/budgets/{}/categories", scope.id());
    let data = match transport.send(HttpMethod::Get, &path, None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode(&data, &KEYS)?))
}

/// A single category as budgeted for one month.
pub async fn get_for_month(
    transport: &dyn Transport,
    scope: &BudgetScope,
    month: &str,
    category_id: &str,
) -> Result<ApiResponse<Decoded<Category>>, ClientError> {
    let path = format!(
        "/budgets/{}/months/{month}/categories/{category_id}",
        scope.id()
    );
    let data = match transport.send(HttpMethod::Get, &path, None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode(&data, &KEYS)?))
}

/// Partial update: the body carries only caller-set fields, wrapped in
/// the single-key `category` envelope. With a month scope the update
/// targets that month's view of the category.
pub async fn update(
    transport: &dyn Transport,
    scope: &BudgetScope,
    category_id: &str,
    month: Option<&str>,
    patch: &CategoryPatch,
) -> Result<ApiResponse<Category>, ClientError> {
    let budget_id = scope.id();
    let path = match month {
        Some(month) => format!("/budgets/{budget_id}/months/{month}/categories/{category_id}"),
        None => format!("/budgets/{budget_id}/categories/{category_id}"),
    };
    let body = json!({ "category": patch });
    let data = match transport.send(HttpMethod::Put, &path, Some(body)).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_single(&data, "category")?))
}
