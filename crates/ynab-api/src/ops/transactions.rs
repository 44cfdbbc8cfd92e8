use serde_json::json;

use crate::client::{ApiResponse, HttpMethod, Transport};
use crate::error::ClientError;
use crate::models::{Transaction, TransactionPayload};

use super::{decode, decode_single, BudgetScope, Decoded, ResponseKeys};

const KEYS: ResponseKeys = ResponseKeys {
    singular: "transaction",
    grouped: None,
    collection: "transactions",
};

/// Narrowing selectors for transaction reads. Exactly one is honored,
/// by fixed precedence: transaction > category > account > month >
/// payee > the unscoped collection. The order is preserved exactly for
/// compatibility.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub transaction_id: Option<String>,
    pub category_id: Option<String>,
    pub account_id: Option<String>,
    pub month: Option<String>,
    pub payee_id: Option<String>,
    /// ISO date filter; applies to collection reads only.
    pub since: Option<String>,
}

impl TransactionQuery {
    pub(crate) fn path(&self, scope: &BudgetScope) -> String {
        let budget_id = scope.id();
        let (mut path, singular) = if let Some(id) = &self.transaction_id {
            (format!("/budgets/{budget_id}/transactions/{id}"), true)
        } else if let Some(id) = &self.category_id {
            (
                format!("/budgets/{budget_id}/categories/{id}/transactions"),
                false,
            )
        } else if let Some(id) = &self.account_id {
            (
                format!("/budgets/{budget_id}/accounts/{id}/transactions"),
                false,
            )
        } else if let Some(month) = &self.month {
            (
                format!("/budgets/{budget_id}/months/{month}/transactions"),
                false,
            )
        } else if let Some(id) = &self.payee_id {
            (
                format!("/budgets/{budget_id}/payees/{id}/transactions"),
                false,
            )
        } else {
            (format!("/budgets/{budget_id}/transactions"), false)
        };

        if !singular {
            if let Some(since) = &self.since {
                path.push_str("?since=");
                path.push_str(since);
            }
        }
        path
    }
}

pub async fn get(
    transport: &dyn Transport,
    scope: &BudgetScope,
    query: &TransactionQuery,
) -> Result<ApiResponse<Decoded<Transaction>>, ClientError> {
    let path = query.path(scope);
    let data = match transport.send(HttpMethod::Get, &path, None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode(&data, &KEYS)?))
}

/// Always targets the unscoped collection; the payload travels in its
/// single-key `transaction` envelope.
pub async fn create(
    transport: &dyn Transport,
    scope: &BudgetScope,
    payload: &TransactionPayload,
) -> Result<ApiResponse<Transaction>, ClientError> {
    let path = format!("/budgets/{}/transactions", scope.id());
    let body = json!({ "transaction": payload });
    let data = match transport.send(HttpMethod::Post, &path, Some(body)).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_single(&data, "transaction")?))
}

pub async fn update(
    transport: &dyn Transport,
    scope: &BudgetScope,
    transaction_id: &str,
    payload: &TransactionPayload,
) -> Result<ApiResponse<Transaction>, ClientError> {
    let path = format!("/budgets/{}/transactions/{transaction_id}", scope.id());
    let body = json!({ "transaction": payload });
    let data = match transport.send(HttpMethod::Put, &path, Some(body)).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_single(&data, "transaction")?))
}

/// A successful delete still returns the transaction's last known state.
pub async fn delete(
    transport: &dyn Transport,
    scope: &BudgetScope,
    transaction_id: &str,
) -> Result<ApiResponse<Transaction>, ClientError> {
    let path = format!("/budgets/{}/transactions/{transaction_id}", scope.id());
    let data = match transport.send(HttpMethod::Delete, &path, None).await? {
        ApiResponse::Success(data) => data,
        ApiResponse::Error(e) => return Ok(ApiResponse::Error(e)),
    };
    Ok(ApiResponse::Success(decode_single(&data, "transaction")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> TransactionQuery {
        TransactionQuery::default()
    }

    #[test]
    fn unscoped_collection_path() {
        let path = query().path(&BudgetScope::last_used());
        assert_eq!(path, "/budgets/last-used/transactions");
    }

    #[test]
    fn transaction_identity_outranks_every_selector() {
        let q = TransactionQuery {
            transaction_id: Some("t1".to_string()),
            category_id: Some("c1".to_string()),
            account_id: Some("a1".to_string()),
            month: Some("2024-01-01".to_string()),
            payee_id: Some("p1".to_string()),
            since: Some("2024-01-01".to_string()),
        };
        // singular path, and `since` does not apply
        assert_eq!(
            q.path(&BudgetScope::new("b1")),
            "/budgets/b1/transactions/t1"
        );
    }

    #[test]
    fn category_outranks_account_month_and_payee() {
        let q = TransactionQuery {
            category_id: Some("c1".to_string()),
            account_id: Some("a1".to_string()),
            month: Some("2024-01-01".to_string()),
            payee_id: Some("p1".to_string()),
            ..query()
        };
        assert_eq!(
            q.path(&BudgetScope::last_used()),
            "/budgets/last-used/categories/c1/transactions"
        );
    }

    #[test]
    fn account_outranks_month_and_payee() {
        let q = TransactionQuery {
            account_id: Some("a1".to_string()),
            month: Some("2024-01-01".to_string()),
            payee_id: Some("p1".to_string()),
            ..query()
        };
        assert_eq!(
            q.path(&BudgetScope::last_used()),
            "/budgets/last-used/accounts/a1/transactions"
        );
    }

    #[test]
    fn month_outranks_payee() {
        let q = TransactionQuery {
            month: Some("2024-01-01".to_string()),
            payee_id: Some("p1".to_string()),
            ..query()
        };
        assert_eq!(
            q.path(&BudgetScope::last_used()),
            "/budgets/last-used/months/2024-01-01/transactions"
        );
    }

    #[test]
    fn since_narrows_collection_reads() {
        let q = TransactionQuery {
            category_id: Some("c1".to_string()),
            since: Some("2024-01-01".to_string()),
            ..query()
        };
        assert_eq!(
            q.path(&BudgetScope::last_used()),
            "/budgets/last-used/categories/c1/transactions?since=2024-01-01"
        );
    }
}
