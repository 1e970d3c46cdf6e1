//! Expense CRUD operations

use crate::DEFAULT_PAYMENT_METHOD;
use crate::business::store::ExpenseStore;
use crate::database::models::{Expense, NewExpense};
use crate::database::queries;
use crate::error::{Result, StoreError};

/// Reject payloads that would persist an unusable row
///
/// Runs before any write is attempted, so a rejected payload is never
/// partially applied.
fn validate(expense: &NewExpense) -> Result<()> {
    if expense.amount.is_nan() || expense.amount <= 0.0 {
        return Err(StoreError::Validation {
            field: "amount",
            message: format!("must be greater than zero, got {}", expense.amount),
        });
    }
    if expense.category.is_empty() {
        return Err(StoreError::Validation {
            field: "category",
            message: "must not be empty".to_string(),
        });
    }
    if expense.date.is_empty() {
        return Err(StoreError::Validation {
            field: "date",
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

impl ExpenseStore {
    /// Record a new expense and return its assigned id
    ///
    /// Validates the payload, fills in the `"cash"` payment-method and
    /// empty-note defaults, and stamps `created_at` with the current
    /// instant.
    pub fn add_expense(&self, expense: &NewExpense) -> Result<i64> {
        validate(expense)?;
        let created_at = queries::now_timestamp();
        self.with_db(|db| {
            queries::insert_expense(
                db.connection(),
                expense.amount,
                &expense.category,
                expense
                    .payment_method
                    .as_deref()
                    .unwrap_or(DEFAULT_PAYMENT_METHOD),
                expense.note.as_deref().unwrap_or(""),
                &expense.date,
                &created_at,
            )
        })
    }

    /// Replace all mutable fields of the expense matching `id`
    ///
    /// A missing `id` is a silent no-op, not an error; callers that
    /// need to detect it use [`queries::update_expense`] directly.
    /// The amount/category/date preconditions apply at creation time
    /// only and are not re-checked here.
    pub fn update_expense(&self, id: i64, expense: &NewExpense) -> Result<()> {
        self.with_db(|db| {
            queries::update_expense(
                db.connection(),
                id,
                expense.amount,
                &expense.category,
                expense
                    .payment_method
                    .as_deref()
                    .unwrap_or(DEFAULT_PAYMENT_METHOD),
                expense.note.as_deref().unwrap_or(""),
                &expense.date,
            )?;
            Ok(())
        })
    }

    /// Delete the expense matching `id`; silent no-op when absent
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        self.with_db(|db| {
            queries::delete_expense(db.connection(), id)?;
            Ok(())
        })
    }

    /// Look up a single expense by id
    pub fn expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        self.with_db(|db| queries::get_expense_by_id(db.connection(), id))
    }

    /// All expenses, newest first
    pub fn all_expenses(&self) -> Result<Vec<Expense>> {
        self.with_db(|db| queries::list_all(db.connection()))
    }

    /// Expenses within `start <= date <= end`, newest first
    pub fn expenses_in_range(&self, start: &str, end: &str) -> Result<Vec<Expense>> {
        self.with_db(|db| queries::list_by_date_range(db.connection(), start, end))
    }

    /// The `limit` newest expenses
    pub fn recent_expenses(&self, limit: u32) -> Result<Vec<Expense>> {
        self.with_db(|db| queries::list_recent(db.connection(), limit))
    }
}
