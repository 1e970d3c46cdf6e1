//! Database migration logic for version upgrades
//!
//! The schema version is stored in the settings table under
//! `schema_version`; a database with no version row is version 0.
//! Each migration commits its version bump in the same transaction as
//! its schema changes, so a crash mid-migration resumes from the last
//! committed version instead of assuming completion.

use log::info;
use rusqlite::{Connection, params};

use super::schema;
use crate::error::Result;
use crate::{SCHEMA_VERSION, SCHEMA_VERSION_KEY};

/// Bring a freshly-opened connection up to [`SCHEMA_VERSION`]
pub fn run(conn: &mut Connection) -> Result<()> {
    // The settings table carries the version row, so it must exist
    // before the version can be read.
    conn.execute_batch(schema::CREATE_SETTINGS_TABLE)?;

    let current = current_version(conn)?;
    if current < 2 {
        info!("migrating database schema from version {current} to 2");
        migrate_to_v2(conn)?;
    }

    Ok(())
}

/// Read the last-applied schema version (0 if absent or unparseable)
pub fn current_version(conn: &Connection) -> Result<i64> {
    let version: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = ?",
            params![SCHEMA_VERSION_KEY],
            |row| row.get(0),
        )
        .ok();

    Ok(version.and_then(|v| v.parse().ok()).unwrap_or(0))
}

/// Upgrade from v0/v1 to v2
///
/// Schema v1 created the column as `paymentMethod` while every query
/// reads `payment_method`, so the table never round-tripped. SQLite
/// predating widespread RENAME COLUMN support left drop-and-recreate
/// as the fix: any rows in the defective v1 table are lost. One-time
/// reset of a pre-release schema; later migrations must preserve data.
fn migrate_to_v2(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute_batch("DROP TABLE IF EXISTS expenses")?;
    tx.execute_batch(schema::CREATE_EXPENSES_TABLE)?;
    tx.execute_batch(schema::CREATE_DATE_INDEX)?;
    tx.execute_batch(schema::CREATE_CATEGORY_INDEX)?;

    // Version bump is the final statement of the migration transaction
    tx.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)",
        params![SCHEMA_VERSION_KEY, SCHEMA_VERSION.to_string()],
    )?;

    tx.commit()?;
    Ok(())
}
