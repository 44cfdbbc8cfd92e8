use crate::client::{ApiResponse, HttpMethod, Transport};
use crate::error::ClientError;
use crate::models::User;

use super::decode_single;

pub async fn get(transport: &dyn Transport) -> Result<ApiResponse<User>, ClientError> {
    let data = match transport.send(HttpMethod::Get, "/user", None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_single(&data, "user")?))
}
