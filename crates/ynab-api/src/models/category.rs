use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{put_currency, to_object};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_category_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_needs_whole_amount: Option<bool>,
    /// Day of the goal cadence, not a monetary amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_cadence: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_cadence_frequency: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_creation_month: Option<String>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_target_month: Option<String>,
    /// Integer percentage, not a monetary amount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_percentage_complete: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_months_to_budget: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_under_funded: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_overall_funded: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_overall_left: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_snoozed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl Category {
    pub fn host_value(&self) -> serde_json::Result<Value> {
        let mut map = to_object(self)?;
        put_currency(&mut map, "budgeted", self.budgeted);
        put_currency(&mut map, "activity", self.activity);
        put_currency(&mut map, "balance", self.balance);
        put_currency(&mut map, "goal_target", self.goal_target);
        put_currency(&mut map, "goal_under_funded", self.goal_under_funded);
        put_currency(&mut map, "goal_overall_funded", self.goal_overall_funded);
        put_currency(&mut map, "goal_overall_left", self.goal_overall_left);
        Ok(Value::Object(map))
    }
}

/// Partial update: only caller-set fields are serialized so the server's
/// values for untouched fields are preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgeted: Option<i64>,
    /// Milliunits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_target: Option<i64>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.note.is_none()
            && self.category_group_id.is_none()
            && self.hidden.is_none()
            && self.budgeted.is_none()
            && self.goal_target.is_none()
    }
}
