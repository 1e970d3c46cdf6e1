//! Spending aggregation reports
//!
//! Every report runs over a caller-supplied inclusive `[start, end]`
//! date range. Sums are plain floating point; rounding for display is
//! the caller's concern.

use serde::{Deserialize, Serialize};

use crate::business::store::ExpenseStore;
use crate::database::models::{CategoryTotal, DailyTotal, WeeklyTotal};
use crate::database::queries;
use crate::error::Result;

/// Spending measured against the monthly budget setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Total spent in the queried range
    pub spent: f64,
    /// The configured monthly budget
    pub budget: f64,
    /// `spent / budget`, 0.0 when no budget is configured
    pub ratio: f64,
}

impl ExpenseStore {
    /// Sum of all amounts in the range; 0.0 when nothing matches
    pub fn total_in_range(&self, start: &str, end: &str) -> Result<f64> {
        self.with_db(|db| queries::total_in_range(db.connection(), start, end))
    }

    /// Per-category sums, largest first; empty categories are omitted
    pub fn totals_by_category(&self, start: &str, end: &str) -> Result<Vec<CategoryTotal>> {
        self.with_db(|db| queries::totals_by_category(db.connection(), start, end))
    }

    /// Per-calendar-day sums, oldest first; empty days are omitted
    pub fn daily_totals(&self, start: &str, end: &str) -> Result<Vec<DailyTotal>> {
        self.with_db(|db| queries::daily_totals(db.connection(), start, end))
    }

    /// Per-calendar-week sums, oldest first
    pub fn weekly_totals(&self, start: &str, end: &str) -> Result<Vec<WeeklyTotal>> {
        self.with_db(|db| queries::weekly_totals(db.connection(), start, end))
    }

    /// Spending in the range measured against the monthly budget
    pub fn budget_progress(&self, start: &str, end: &str) -> Result<BudgetProgress> {
        let spent = self.total_in_range(start, end)?;
        let budget = self.monthly_budget()?;
        let ratio = if budget > 0.0 { spent / budget } else { 0.0 };
        Ok(BudgetProgress {
            spent,
            budget,
            ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewExpense;

    fn store() -> ExpenseStore {
        ExpenseStore::open_in_memory()
    }

    fn add(store: &ExpenseStore, amount: f64, category: &str, date: &str) {
        store
            .add_expense(&NewExpense {
                amount,
                category: category.to_string(),
                payment_method: None,
                note: None,
                date: date.to_string(),
            })
            .unwrap();
    }

    #[test]
    fn test_total_in_empty_range_is_zero() {
        let store = store();
        let total = store.total_in_range("2026-01-01", "2026-01-31").unwrap();
        assert_eq!(total, 0.0);
    }

    #[test]
    fn test_total_respects_inclusive_bounds() {
        let store = store();
        add(&store, 10.0, "food", "2026-01-01");
        add(&store, 20.0, "food", "2026-01-15");
        add(&store, 40.0, "food", "2026-01-31");
        add(&store, 80.0, "food", "2026-02-01");

        let total = store.total_in_range("2026-01-01", "2026-01-31").unwrap();
        assert_eq!(total, 70.0);
    }

    #[test]
    fn test_category_totals_ordered_and_consistent_with_total() {
        let store = store();
        add(&store, 100.0, "rent", "2026-01-02");
        add(&store, 30.0, "food", "2026-01-03");
        add(&store, 45.0, "food", "2026-01-10");
        add(&store, 20.0, "travel", "2026-01-20");

        let by_category = store
            .totals_by_category("2026-01-01", "2026-01-31")
            .unwrap();

        let categories: Vec<_> = by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["rent", "food", "travel"]);
        assert_eq!(by_category[1].total, 75.0);

        // Group sums add up to the ungrouped total
        let sum: f64 = by_category.iter().map(|c| c.total).sum();
        let total = store.total_in_range("2026-01-01", "2026-01-31").unwrap();
        assert_eq!(sum, total);
    }

    #[test]
    fn test_category_totals_omit_out_of_range_categories() {
        let store = store();
        add(&store, 100.0, "rent", "2025-12-15");
        add(&store, 30.0, "food", "2026-01-03");

        let by_category = store
            .totals_by_category("2026-01-01", "2026-01-31")
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].category, "food");
    }

    #[test]
    fn test_daily_totals_skip_empty_days() {
        let store = store();
        add(&store, 10.0, "food", "2026-01-01T09:00:00.000Z");
        add(&store, 5.0, "food", "2026-01-04T19:00:00.000Z");

        let days = store.daily_totals("2026-01-01", "2026-01-31").unwrap();
        let keys: Vec<_> = days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(keys, vec!["2026-01-01", "2026-01-04"]);
    }

    #[test]
    fn test_budget_progress_ratio() {
        let store = store();
        store.set_setting("monthlyBudget", "10000").unwrap();
        add(&store, 4000.0, "rent", "2026-08-02");
        add(&store, 2500.0, "food", "2026-08-10");
        add(&store, 1000.0, "travel", "2026-08-15");

        let progress = store.budget_progress("2026-08-01", "2026-08-31").unwrap();
        assert_eq!(progress.spent, 7500.0);
        assert_eq!(progress.budget, 10000.0);
        assert_eq!(progress.ratio, 0.75);
    }

    #[test]
    fn test_budget_progress_with_zero_budget() {
        let store = store();
        store.set_setting("monthlyBudget", "0").unwrap();
        add(&store, 50.0, "food", "2026-08-02");

        let progress = store.budget_progress("2026-08-01", "2026-08-31").unwrap();
        assert_eq!(progress.spent, 50.0);
        assert_eq!(progress.ratio, 0.0);
    }
}
