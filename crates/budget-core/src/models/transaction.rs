use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Transaction {
    pub id_transaction: String,
    pub description: String,
    pub value: f64,
    /// Date as sent by the server
    pub transaction_date: String,
    pub expense: TransactionExpense,
}

/// Expense category embedded in a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct TransactionExpense {
    pub id_expense: String,
    pub planned_value: f64,
    pub description: String,
}
