use crate::client::{ApiResponse, HttpMethod, Transport};
use crate::error::ClientError;
use crate::models::Budget;

use super::decode_list;

pub async fn list(transport: &dyn Transport) -> Result<ApiResponse<Vec<Budget>>, ClientError> {
    let data = match transport.send(HttpMethod::Get, "/budgets", None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_list(&data, "budgets")?))
}
