use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{put_currency, to_object};

/// Sentinel month meaning "the current month".
pub const CURRENT: &str = "current";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Month {
    #[serde(default = "default_month")]
    pub month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_be_budgeted: Option<i64>,
    /// Age of money in days, not a monetary amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_of_money: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

fn default_month() -> String {
    CURRENT.to_string()
}

impl Month {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        let mut map = to_object(self)?;
        put_currency(&mut map, "income", self.income);
        put_currency(&mut map, "budgeted", self.budgeted);
        put_currency(&mut map, "activity", self.activity);
        put_currency(&mut map, "to_be_budgeted", self.to_be_budgeted);
        Ok(Value::Object(map))
    }
}
