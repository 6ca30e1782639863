use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ExpenseCategory {
    pub id_expense: String,
    pub description: String,
    pub planned_value: f64,
}
