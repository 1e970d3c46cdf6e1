//! Bulk operations: chronological export and full wipe

use log::info;

use crate::business::store::ExpenseStore;
use crate::database::models::Expense;
use crate::database::queries;
use crate::error::Result;

impl ExpenseStore {
    /// Every expense ordered oldest first, for chronological export
    ///
    /// Ordering is the reverse of [`all_expenses`](Self::all_expenses);
    /// serializing the dump (CSV or otherwise) is the caller's job.
    pub fn export_all(&self) -> Result<Vec<Expense>> {
        self.with_db(|db| queries::export_all(db.connection()))
    }

    /// Delete every expense and every setting in one transaction
    ///
    /// This clears `schema_version` with the rest of the settings: a
    /// factory reset, after which a freshly-opened store re-runs
    /// migrations against the already-empty table.
    pub fn wipe_all(&self) -> Result<()> {
        self.with_db(|db| {
            let tx = db.connection_mut().transaction()?;
            tx.execute("DELETE FROM expenses", [])?;
            tx.execute("DELETE FROM settings", [])?;
            tx.commit()?;
            info!("wiped all expenses and settings");
            Ok(())
        })
    }
}
