//! # spendcore
//!
//! The local persistence and aggregation core of a personal expense
//! tracker, backed by an embedded SQLite database.
//!
//! ## Features
//!
//! - Expense records with category, payment method, note and date
//! - Key/value settings store with a typed preference boundary
//! - Versioned schema migrations with crash-safe version tracking
//! - Range, category, daily and weekly spending aggregations
//! - Chronological export and transactional full wipe
//!
//! ## Example
//!
//! ```no_run
//! use spendcore::{ExpenseStore, NewExpense};
//!
//! let store = ExpenseStore::open("/path/to/expenses.db");
//!
//! let id = store.add_expense(&NewExpense {
//!     amount: 240.0,
//!     category: "groceries".to_string(),
//!     payment_method: None, // defaults to "cash"
//!     note: None,
//!     date: "2026-08-06T10:00:00.000Z".to_string(),
//! }).unwrap();
//!
//! let expense = store.expense_by_id(id).unwrap();
//! println!("{:?}", expense);
//! ```

pub mod business;
pub mod database;
pub mod error;

// Re-export main types
pub use business::{BudgetProgress, ExpenseStore, Preferences};
pub use database::models::{CategoryTotal, DailyTotal, Expense, NewExpense, WeeklyTotal};
pub use error::{Result, StoreError};

/// Schema version the store migrates databases to
pub const SCHEMA_VERSION: i64 = 2;

/// Settings key holding the last-applied schema version
pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Default database filename
pub const DATABASE_FILENAME: &str = "expenses.db";

/// Payment method assigned when an expense omits one
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";
