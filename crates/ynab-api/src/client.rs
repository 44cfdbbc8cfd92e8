use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, ClientError};

/// Outcome of a provider call that produced a response body. A provider
/// rejection travels as a value so callers can inspect it; faults use
/// `ClientError` instead.
#[derive(Debug, Clone)]
pub enum ApiResponse<T> {
    Success(T),
    Error(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Plain "send request, get response" capability. Operations talk to this
/// trait so tests can substitute a mock transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse<Value>, ClientError>;
}

/// HTTP transport for the YNAB API: bearer auth, one independent request
/// per call, no retries.
pub struct YnabClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl YnabClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for YnabClient {
    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse<Value>, ClientError> {
        let url = self.url_for(path);
        debug!(%method, %url, has_body = body.is_some(), "sending provider request");

        let mut request = self
            .http
            .request(method.as_reqwest(), &url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        classify_response(status.as_u16(), status.is_success(), &text)
    }
}

/// Sorts a raw response: 2xx bodies must carry a `data` envelope,
/// structured rejections become `ApiResponse::Error`, and everything
/// else is a fault.
fn classify_response(
    status: u16,
    is_success: bool,
    body: &str,
) -> Result<ApiResponse<Value>, ClientError> {
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) if is_success => {
            return Err(ClientError::UnexpectedFormat(format!(
                "success body is not JSON: {body}"
            )))
        }
        Err(_) => {
            return Err(ClientError::Http {
                status,
                body: body.to_string(),
            })
        }
    };

    if is_success {
        return match json.get("data") {
            Some(data) => Ok(ApiResponse::Success(data.clone())),
            None => Err(ClientError::UnexpectedFormat(format!(
                "success body without a data envelope: {json}"
            ))),
        };
    }

    // A malformed error envelope is just an unstructured failure.
    if let Some(error) = json.get("error") {
        if let Ok(api_error) = serde_json::from_value::<ApiError>(error.clone()) {
            warn!(
                status,
                id = %api_error.id,
                name = %api_error.name,
                "provider rejected request"
            );
            return Ok(ApiResponse::Error(api_error));
        }
    }

    Err(ClientError::Http {
        status,
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base_url: &str) -> YnabClient {
        YnabClient::new(&Config {
            api_token: "tok".to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn url_join_trims_duplicate_slashes() {
        let client = client("https://api.ynab.com/v1/");
        assert_eq!(
            client.url_for("/budgets"),
            "https://api.ynab.com/v1/budgets"
        );
        assert_eq!(
            client.url_for("budgets/last-used/accounts"),
            "https://api.ynab.com/v1/budgets/last-used/accounts"
        );
    }

    #[test]
    fn success_body_yields_data_envelope() {
        let result = classify_response(200, true, r#"{"data":{"budgets":[]}}"#).unwrap();
        match result {
            ApiResponse::Success(data) => assert_eq!(data, serde_json::json!({"budgets": []})),
            ApiResponse::Error(e) => panic!("unexpected rejection: {e:?}"),
        }
    }

    #[test]
    fn success_body_without_data_is_a_fault() {
        let result = classify_response(200, true, r#"{"budgets":[]}"#);
        assert!(matches!(result, Err(ClientError::UnexpectedFormat(_))));
    }

    #[test]
    fn structured_rejection_is_returned_as_a_value() {
        let body = r#"{"error":{"id":"401","name":"unauthorized","detail":"bad token"}}"#;
        let result = classify_response(401, false, body).unwrap();
        match result {
            ApiResponse::Error(e) => {
                assert_eq!(e.id, "401");
                assert_eq!(e.name, "unauthorized");
                assert_eq!(e.detail, "bad token");
            }
            ApiResponse::Success(_) => panic!("expected a rejection"),
        }
    }

    #[test]
    fn unstructured_failure_is_a_fault() {
        let result = classify_response(502, false, "Bad Gateway");
        assert!(matches!(
            result,
            Err(ClientError::Http { status: 502, .. })
        ));

        let result = classify_response(500, false, r#"{"message":"boom"}"#);
        assert!(matches!(
            result,
            Err(ClientError::Http { status: 500, .. })
        ));
    }

    #[test]
    fn malformed_error_envelope_is_an_http_fault() {
        let result = classify_response(500, false, r#"{"error":"boom"}"#);
        assert!(matches!(
            result,
            Err(ClientError::Http { status: 500, .. })
        ));
    }
}
