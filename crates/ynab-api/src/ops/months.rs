use crate::client::{ApiResponse, HttpMethod, Transport};
use crate::error::ClientError;
use crate::models::Month;

use super::{decode_list, BudgetScope};

pub async fn list(
    transport: &dyn Transport,
    scope: &BudgetScope,
) -> Result<ApiResponse<Vec<Month>>, ClientError> {
    let path = format!("/budgets/{}/months", scope.id());
    let data = match transport.send(HttpMethod::Get, &path, None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_list(&data, "months")?))
}
