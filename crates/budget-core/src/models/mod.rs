//! Data models for budgeting entities.
//!
//! - `ExpenseCategory`: a planned expense bucket
//! - `Investment`: a holding with its type and location
//! - `Transaction`: a posted transaction tied to an expense category

pub mod expense;
pub mod investment;
pub mod transaction;

pub use expense::ExpenseCategory;
pub use investment::{Investment, InvestmentLocation, InvestmentType};
pub use transaction::{Transaction, TransactionExpense};
