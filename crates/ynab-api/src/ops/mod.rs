//! Resource operations: build the path for a resource scope, issue the
//! request through the transport, decode the response envelope.
//!
//! Provider rejections (`ApiResponse::Error`) pass through every
//! operation unchanged. A 2xx body lacking all expected keys is a
//! contract violation and surfaces as `ClientError::UnexpectedFormat`,
//! never as an empty result.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod months;
pub mod payees;
pub mod transactions;
pub mod user;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::models::budget;

/// Budget scope under which every nested resource is addressed. An
/// explicit id overrides the `last-used` sentinel.
#[derive(Debug, Clone, Default)]
pub struct BudgetScope {
    id: Option<String>,
}

impl BudgetScope {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    pub fn last_used() -> Self {
        Self::default()
    }

    pub fn from_option(id: Option<String>) -> Self {
        Self {
            id: id.filter(|id| !id.is_empty()),
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(budget::LAST_USED)
    }
}

/// Shape of a decoded response: a fully-identified single resource or a
/// collection.
#[derive(Debug, Clone)]
pub enum Decoded<T> {
    One(T),
    Many(Vec<T>),
}

/// Envelope keys checked in fixed precedence order: singular first, then
/// a grouped collection (items nested per group), then a flat collection.
pub(crate) struct ResponseKeys {
    pub singular: &'static str,
    pub grouped: Option<(&'static str, &'static str)>,
    pub collection: &'static str,
}

fn bad_item(key: &str, err: serde_json::Error) -> ClientError {
    ClientError::UnexpectedFormat(format!("undecodable {key} resource: {err}"))
}

fn not_an_array(key: &str) -> ClientError {
    ClientError::UnexpectedFormat(format!("{key} is not an array"))
}

fn decode_items<T: DeserializeOwned>(items: &[Value], key: &str) -> Result<Vec<T>, ClientError> {
    items
        .iter()
        .map(|item| serde_json::from_value(item.clone()).map_err(|e| bad_item(key, e)))
        .collect()
}

/// The first expected key present determines the decoding shape; none
/// present is an unexpected-format fault.
pub(crate) fn decode<T: DeserializeOwned>(
    data: &Value,
    keys: &ResponseKeys,
) -> Result<Decoded<T>, ClientError> {
    if let Some(one) = data.get(keys.singular) {
        let item = serde_json::from_value(one.clone()).map_err(|e| bad_item(keys.singular, e))?;
        return Ok(Decoded::One(item));
    }

    if let Some((group_key, nested_key)) = keys.grouped {
        if let Some(groups) = data.get(group_key) {
            let groups = groups.as_array().ok_or_else(|| not_an_array(group_key))?;
            let mut items = Vec::new();
            for group in groups {
                let nested = group
                    .get(nested_key)
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        ClientError::UnexpectedFormat(format!(
                            "{group_key} entry without a {nested_key} array"
                        ))
                    })?;
                items.extend(decode_items(nested, nested_key)?);
            }
            return Ok(Decoded::Many(items));
        }
    }

    if let Some(many) = data.get(keys.collection) {
        let many = many.as_array().ok_or_else(|| not_an_array(keys.collection))?;
        return Ok(Decoded::Many(decode_items(many, keys.collection)?));
    }

    Err(ClientError::UnexpectedFormat(format!(
        "response data carries none of the expected keys ({}, {})",
        keys.singular, keys.collection
    )))
}

/// Flat collection endpoints: only the collection key is expected.
pub(crate) fn decode_list<T: DeserializeOwned>(
    data: &Value,
    collection: &'static str,
) -> Result<Vec<T>, ClientError> {
    let many = data
        .get(collection)
        .ok_or_else(|| {
            ClientError::UnexpectedFormat(format!("no {collection} key in response data"))
        })?
        .as_array()
        .ok_or_else(|| not_an_array(collection))?;
    decode_items(many, collection)
}

/// Singular endpoints: only the singular key is expected.
pub(crate) fn decode_single<T: DeserializeOwned>(
    data: &Value,
    singular: &'static str,
) -> Result<T, ClientError> {
    let one = data.get(singular).ok_or_else(|| {
        ClientError::UnexpectedFormat(format!("no {singular} key in response data"))
    })?;
    serde_json::from_value(one.clone()).map_err(|e| bad_item(singular, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use serde_json::json;

    const CATEGORY_KEYS: ResponseKeys = ResponseKeys {
        singular: "category",
        grouped: Some(("category_groups", "categories")),
        collection: "categories",
    };

    #[test]
    fn explicit_budget_id_overrides_the_sentinel() {
        assert_eq!(BudgetScope::last_used().id(), "last-used");
        assert_eq!(BudgetScope::new("b1").id(), "b1");
        assert_eq!(BudgetScope::from_option(None).id(), "last-used");
        assert_eq!(BudgetScope::from_option(Some("b2".to_string())).id(), "b2");
        assert_eq!(BudgetScope::from_option(Some(String::new())).id(), "last-used");
    }

    #[test]
    fn singular_key_wins_over_grouped_key() {
        let data = json!({
            "category": {"id": "c1", "name": "Rent"},
            "category_groups": [
                {"id": "g1", "categories": [{"id": "c2"}]}
            ]
        });
        match decode::<Category>(&data, &CATEGORY_KEYS).unwrap() {
            Decoded::One(category) => assert_eq!(category.id, "c1"),
            Decoded::Many(_) => panic!("expected the singular shape"),
        }
    }

    #[test]
    fn grouped_key_flattens_nested_categories() {
        let data = json!({
            "category_groups": [
                {"id": "g1", "categories": [{"id": "c1"}, {"id": "c2"}]},
                {"id": "g2", "categories": [{"id": "c3"}]}
            ]
        });
        match decode::<Category>(&data, &CATEGORY_KEYS).unwrap() {
            Decoded::Many(categories) => {
                let ids: Vec<_> = categories.iter().map(|c| c.id.as_str()).collect();
                assert_eq!(ids, vec!["c1", "c2", "c3"]);
            }
            Decoded::One(_) => panic!("expected the collection shape"),
        }
    }

    #[test]
    fn missing_every_expected_key_is_a_fault() {
        let data = json!({"something_else": []});
        let result = decode::<Category>(&data, &CATEGORY_KEYS);
        assert!(matches!(result, Err(ClientError::UnexpectedFormat(_))));
    }

    #[test]
    fn grouped_entry_without_nested_array_is_a_fault() {
        let data = json!({"category_groups": [{"id": "g1"}]});
        let result = decode::<Category>(&data, &CATEGORY_KEYS);
        assert!(matches!(result, Err(ClientError::UnexpectedFormat(_))));
    }
}
