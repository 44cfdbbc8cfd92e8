use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{put_currency, put_map_currency, to_object};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_budget: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleared_balance: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uncleared_balance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_payee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reconciled_at: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_original_balance: Option<i64>,
    /// Month string -> milliunit points, converted element-wise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_interest_rates: Option<BTreeMap<String, i64>>,
    /// Month string -> milliunits, converted element-wise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_minimum_payments: Option<BTreeMap<String, i64>>,
    /// Month string -> milliunits, converted element-wise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_escrow_amounts: Option<BTreeMap<String, i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl Account {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        let mut map = to_object(self)?;
        put_currency(&mut map, "balance", self.balance);
        put_currency(&mut map, "cleared_balance", self.cleared_balance);
        put_currency(&mut map, "uncleared_balance", self.uncleared_balance);
        put_currency(
            &mut map,
            "debt_original_balance",
            self.debt_original_balance,
        );
        put_map_currency(
            &mut map,
            "debt_interest_rates_in_percentage",
            self.debt_interest_rates.as_ref(),
        );
        put_map_currency(
            &mut map,
            "debt_minimum_payments_in_currency",
            self.debt_minimum_payments.as_ref(),
        );
        put_map_currency(
            &mut map,
            "debt_escrow_amounts_in_currency",
            self.debt_escrow_amounts.as_ref(),
        );
        Ok(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_balance_stays_absent() {
        let account: Account = serde_json::from_value(json!({"id": "a1"})).unwrap();
        assert_eq!(account.id, "a1");
        assert!(account.balance.is_none());

        let value = account.host_value().unwrap();
        assert_eq!(value, json!({"id": "a1"}));
    }

    #[test]
    fn balances_and_debt_maps_convert() {
        let account: Account = serde_json::from_value(json!({
            "id": "a1",
            "type": "creditCard",
            "balance": -12_340,
            "cleared_balance": -12_000,
            "debt_original_balance": -500_000,
            "debt_interest_rates": {"2024-01-01": 19_990},
            "debt_minimum_payments": {"2024-01-01": 25_000}
        }))
        .unwrap();
        let value = account.host_value().unwrap();
        assert_eq!(value["type"], json!("creditCard"));
        assert_eq!(value["balance"], json!(-12_340));
        assert_eq!(value["balance_in_currency"], json!(-12.34));
        assert_eq!(value["cleared_balance_in_currency"], json!(-12.0));
        assert_eq!(value["debt_original_balance"], json!(-500_000));
        assert_eq!(value["debt_original_balance_in_currency"], json!(-500.0));
        assert_eq!(
            value["debt_interest_rates_in_percentage"],
            json!({"2024-01-01": 19.99})
        );
        assert_eq!(
            value["debt_minimum_payments_in_currency"],
            json!({"2024-01-01": 25.0})
        );
        assert!(value.get("uncleared_balance_in_currency").is_none());
        assert!(value.get("debt_escrow_amounts_in_currency").is_none());
    }
}
