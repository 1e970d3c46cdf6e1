//! Settings operations
//!
//! Two layers over the same `settings` table: raw string get/set with
//! upsert semantics, and a typed [`Preferences`] boundary that parses
//! on read and serializes on write so callers never juggle stringified
//! booleans and numbers. The persisted representation is always text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::business::store::ExpenseStore;
use crate::database::queries;
use crate::error::Result;

/// User preferences with their persisted settings keys
///
/// Every field falls back to its default when the stored value is
/// absent or unparseable; reads never fail on bad data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// ISO currency code ("INR", "USD", ...)
    pub currency: String,
    /// Symbol shown next to amounts
    pub currency_symbol: String,
    /// Overall monthly spending budget
    pub monthly_budget: f64,
    /// Payment method pre-selected in entry forms
    pub default_payment_method: String,
    /// Whether the daily logging reminder is on
    pub reminder_enabled: bool,
    /// Reminder time as an HH:MM string
    pub reminder_time: String,
    /// Whether the app asks for a biometric unlock
    pub app_lock_enabled: bool,
    /// Per-category budgets, keyed by category id
    pub category_budgets: HashMap<String, f64>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            monthly_budget: 10_000.0,
            default_payment_method: "cash".to_string(),
            reminder_enabled: false,
            reminder_time: "20:00".to_string(),
            app_lock_enabled: false,
            category_budgets: HashMap::new(),
        }
    }
}

impl Preferences {
    /// Build preferences from a raw settings snapshot
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            currency: map
                .get("currency")
                .cloned()
                .unwrap_or(defaults.currency),
            currency_symbol: map
                .get("currencySymbol")
                .cloned()
                .unwrap_or(defaults.currency_symbol),
            monthly_budget: map
                .get("monthlyBudget")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.monthly_budget),
            default_payment_method: map
                .get("defaultPaymentMethod")
                .cloned()
                .unwrap_or(defaults.default_payment_method),
            reminder_enabled: map
                .get("reminderEnabled")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reminder_enabled),
            reminder_time: map
                .get("reminderTime")
                .cloned()
                .unwrap_or(defaults.reminder_time),
            app_lock_enabled: map
                .get("appLockEnabled")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.app_lock_enabled),
            category_budgets: map
                .get("categoryBudgets")
                .and_then(|v| serde_json::from_str(v).ok())
                .unwrap_or(defaults.category_budgets),
        }
    }

    /// Serialize every field back to its settings key/value pair
    fn to_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(vec![
            ("currency", self.currency.clone()),
            ("currencySymbol", self.currency_symbol.clone()),
            ("monthlyBudget", self.monthly_budget.to_string()),
            ("defaultPaymentMethod", self.default_payment_method.clone()),
            ("reminderEnabled", self.reminder_enabled.to_string()),
            ("reminderTime", self.reminder_time.clone()),
            ("appLockEnabled", self.app_lock_enabled.to_string()),
            ("categoryBudgets", serde_json::to_string(&self.category_budgets)?),
        ])
    }
}

impl ExpenseStore {
    /// Get a setting, returning `default` when the key is absent
    pub fn setting(&self, key: &str, default: &str) -> Result<String> {
        self.with_db(|db| {
            Ok(queries::get_setting(db.connection(), key)?
                .unwrap_or_else(|| default.to_string()))
        })
    }

    /// Upsert a setting value
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_db(|db| queries::set_setting(db.connection(), key, value))
    }

    /// Full settings snapshot as stored
    pub fn all_settings(&self) -> Result<HashMap<String, String>> {
        self.with_db(|db| queries::get_all_settings(db.connection()))
    }

    /// Read all preferences through the typed boundary
    pub fn preferences(&self) -> Result<Preferences> {
        Ok(Preferences::from_map(&self.all_settings()?))
    }

    /// Persist all preferences, each key upserted individually
    pub fn update_preferences(&self, prefs: &Preferences) -> Result<()> {
        let pairs = prefs.to_pairs()?;
        self.with_db(|db| {
            for (key, value) in &pairs {
                queries::set_setting(db.connection(), key, value)?;
            }
            Ok(())
        })
    }

    /// The monthly budget, defaulting when unset or unparseable
    pub fn monthly_budget(&self) -> Result<f64> {
        Ok(self.preferences()?.monthly_budget)
    }

    /// Set the monthly budget
    pub fn set_monthly_budget(&self, amount: f64) -> Result<()> {
        self.set_setting("monthlyBudget", &amount.to_string())
    }

    /// Per-category budgets decoded from their JSON setting
    pub fn category_budgets(&self) -> Result<HashMap<String, f64>> {
        Ok(self.preferences()?.category_budgets)
    }

    /// Persist per-category budgets as a JSON-encoded setting
    pub fn set_category_budgets(&self, budgets: &HashMap<String, f64>) -> Result<()> {
        let encoded = serde_json::to_string(budgets)?;
        self.set_setting("categoryBudgets", &encoded)
    }
}
