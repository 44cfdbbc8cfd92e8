//! Typed views over the provider's JSON resource shapes.
//!
//! Every field that the provider may omit is an `Option` with
//! `#[serde(default, skip_serializing_if = "Option::is_none")]`: a field
//! absent from provider output stays absent in model output, never
//! coerced to a zero or empty default. Each model owns the milliunits
//! conversion for its own monetary fields and exposes it through
//! `host_value()`, which appends the derived `*_in_currency` fields to
//! the serialized model.

pub mod account;
pub mod budget;
pub mod category;
pub mod month;
pub mod payee;
pub mod transaction;
pub mod user;

pub use account::Account;
pub use budget::Budget;
pub use category::{Category, CategoryPatch};
pub use month::Month;
pub use payee::Payee;
pub use transaction::{SubTransaction, Transaction, TransactionPayload};
pub use user::User;

use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::milliunits;

pub(crate) fn to_object<T: Serialize>(model: &T) -> serde_json::Result<Map<String, Value>> {
    match serde_json::to_value(model)? {
        Value::Object(map) => Ok(map),
        other => Err(serde_json::Error::custom(format!(
            "model serialized to a non-object value: {other}"
        ))),
    }
}

/// Appends `<key>_in_currency` when the raw milliunit amount is present.
/// Absent amounts stay absent on the derived side too.
pub(crate) fn put_currency(map: &mut Map<String, Value>, key: &str, raw: Option<i64>) {
    if let Some(raw) = raw {
        map.insert(
            format!("{key}_in_currency"),
            json!(milliunits::to_currency(raw)),
        );
    }
}

pub(crate) fn put_map_currency(
    map: &mut Map<String, Value>,
    derived_key: &str,
    raw: Option<&BTreeMap<String, i64>>,
) {
    if let Some(raw) = raw {
        map.insert(
            derived_key.to_string(),
            json!(milliunits::map_to_currency(raw)),
        );
    }
}
