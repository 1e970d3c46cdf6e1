//! Data models for expense store entities

use serde::{Deserialize, Serialize};

/// A recorded spending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique id, assigned by the store on insert, monotonically increasing
    pub id: i64,
    /// Amount in the user's selected currency, strictly positive
    pub amount: f64,
    /// Category identifier; the store only requires non-emptiness
    pub category: String,
    /// Payment method identifier ("cash", "card", "upi", ...)
    pub payment_method: String,
    /// Free-text note, empty when none was given
    pub note: String,
    /// When the expense occurred (ISO-8601, user-supplied); the primary
    /// ordering and filtering key
    pub date: String,
    /// When the row was inserted (ISO-8601 UTC, stamped by the store);
    /// audit only, never filtered on
    pub created_at: String,
}

/// Payload for creating or updating an expense
///
/// `id` and `created_at` are store-assigned and therefore absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Amount, must be strictly greater than zero
    pub amount: f64,
    /// Category identifier, must be non-empty
    pub category: String,
    /// Payment method; `None` falls back to `"cash"`
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Note; `None` falls back to the empty string
    #[serde(default)]
    pub note: Option<String>,
    /// When the expense occurred (ISO-8601), must be non-empty
    pub date: String,
}

/// Summed spending for one category over a queried range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Summed spending for one calendar day (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub day: String,
    pub total: f64,
}

/// Summed spending for one calendar week (`YYYY-Wnn`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTotal {
    pub week: String,
    pub total: f64,
}
