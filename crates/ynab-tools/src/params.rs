//! Host-argument extraction shared by every tool.

use anyhow::{anyhow, Result};
use serde_json::Value;

use ynab_api::milliunits;
use ynab_api::ops::BudgetScope;

pub(crate) fn opt_str(params: &Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub(crate) fn require_str(params: &Value, key: &str) -> Result<String> {
    opt_str(params, key).ok_or_else(|| anyhow!("Missing required parameter: '{}'", key))
}

pub(crate) fn opt_bool(params: &Value, key: &str) -> Option<bool> {
    params.get(key).and_then(Value::as_bool)
}

/// Budget scope from the optional `budget_id` argument; absent means the
/// `last-used` sentinel.
pub(crate) fn budget_scope(params: &Value) -> BudgetScope {
    BudgetScope::from_option(opt_str(params, "budget_id"))
}

/// A monetary argument: raw milliunits under `key`, or currency units
/// under `<key>_in_currency`, converted with nearest-milliunit rounding.
/// Raw wins when both are given.
pub(crate) fn opt_milliunits(params: &Value, key: &str) -> Result<Option<i64>> {
    if let Some(raw) = params.get(key).filter(|v| !v.is_null()) {
        let raw = raw
            .as_i64()
            .ok_or_else(|| anyhow!("'{}' must be an integer milliunit amount", key))?;
        return Ok(Some(raw));
    }
    let currency_key = format!("{key}_in_currency");
    if let Some(currency) = params.get(&currency_key).filter(|v| !v.is_null()) {
        let currency = currency
            .as_f64()
            .ok_or_else(|| anyhow!("'{}' must be a number", currency_key))?;
        return Ok(Some(milliunits::to_milliunits(currency)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn milliunits_argument_prefers_raw_over_currency() {
        let params = json!({"amount": -4250, "amount_in_currency": -99.0});
        assert_eq!(opt_milliunits(&params, "amount").unwrap(), Some(-4250));
    }

    #[test]
    fn currency_argument_rounds_to_nearest_milliunit() {
        let params = json!({"amount_in_currency": -4.2506});
        assert_eq!(opt_milliunits(&params, "amount").unwrap(), Some(-4251));
    }

    #[test]
    fn absent_amount_stays_absent() {
        assert_eq!(opt_milliunits(&json!({}), "amount").unwrap(), None);
        assert_eq!(
            opt_milliunits(&json!({"amount": null}), "amount").unwrap(),
            None
        );
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        assert!(opt_milliunits(&json!({"amount": "12"}), "amount").is_err());
    }

    #[test]
    fn empty_budget_id_falls_back_to_sentinel() {
        assert_eq!(budget_scope(&json!({"budget_id": ""})).id(), "last-used");
        assert_eq!(budget_scope(&json!({"budget_id": "b1"})).id(), "b1");
    }
}
