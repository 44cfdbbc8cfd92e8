use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{put_currency, to_object};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    /// One of `cleared`, `uncleared`, `reconciled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_payee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_payee_name_original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtransactions: Option<Vec<SubTransaction>>,
}

/// Split line of a transaction; independently convertible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl SubTransaction {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        let mut map = to_object(self)?;
        put_currency(&mut map, "amount", self.amount);
        Ok(Value::Object(map))
    }
}

impl Transaction {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        let mut map = to_object(self)?;
        put_currency(&mut map, "amount", self.amount);
        if let Some(subtransactions) = &self.subtransactions {
            let converted = subtransactions
                .iter()
                .map(|sub| sub.host_value())
                .collect::<serde_json::Result<Vec<_>>>()?;
            map.insert("subtransactions".to_string(), Value::Array(converted));
        }
        Ok(Value::Object(map))
    }
}

/// Caller-supplied fields for create and update. Only set fields are
/// serialized (partial patch); the server keeps its values for the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn subtransactions_convert_independently() {
        let transaction: Transaction = serde_json::from_value(json!({
            "id": "t1",
            "amount": -50_000,
            "subtransactions": [
                {"id": "s1", "amount": -30_000},
                {"id": "s2", "amount": -20_000, "memo": "split"}
            ]
        }))
        .unwrap();
        let value = transaction.host_value().unwrap();
        assert_eq!(value["amount_in_currency"], json!(-50.0));
        assert_eq!(value["subtransactions"][0]["amount_in_currency"], json!(-30.0));
        assert_eq!(value["subtransactions"][1]["amount_in_currency"], json!(-20.0));
        assert_eq!(value["subtransactions"][1]["memo"], json!("split"));
    }

    #[test]
    fn absent_amount_stays_absent() {
        let transaction: Transaction =
            serde_json::from_value(json!({"id": "t1", "cleared": "uncleared"})).unwrap();
        let value = transaction.host_value().unwrap();
        assert!(value.get("amount").is_none());
        assert!(value.get("amount_in_currency").is_none());
        assert!(value.get("subtransactions").is_none());
    }

    #[test]
    fn payload_serializes_only_set_fields() {
        let payload = TransactionPayload {
            account_id: Some("a1".to_string()),
            amount: Some(-4_250),
            ..TransactionPayload::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"account_id": "a1", "amount": -4_250})
        );
    }
}
