//! SQL query operations for database access
//!
//! This module provides low-level query functions over a raw
//! connection. For validated, defaulted operations use the
//! [`ExpenseStore`](crate::ExpenseStore) API.

use std::collections::HashMap;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Row, params};

use super::models::{CategoryTotal, DailyTotal, Expense, WeeklyTotal};
use crate::error::Result;

/// Get the current instant formatted for storage (ISO-8601 UTC,
/// millisecond precision)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

const EXPENSE_COLUMNS: &str = "id, amount, category, payment_method, note, date, created_at";

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        category: row.get(2)?,
        payment_method: row.get(3)?,
        note: row.get(4)?,
        date: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// ============================================================================
// Expense queries
// ============================================================================

/// Insert an expense row and return its assigned id
pub fn insert_expense(
    conn: &Connection,
    amount: f64,
    category: &str,
    payment_method: &str,
    note: &str,
    date: &str,
    created_at: &str,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO expenses (amount, category, payment_method, note, date, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![amount, category, payment_method, note, date, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Replace all mutable fields of the row matching `id`
///
/// Returns the number of rows affected: 0 when `id` does not exist,
/// which is not an error.
pub fn update_expense(
    conn: &Connection,
    id: i64,
    amount: f64,
    category: &str,
    payment_method: &str,
    note: &str,
    date: &str,
) -> Result<usize> {
    let rows = conn.execute(
        "UPDATE expenses SET amount = ?, category = ?, payment_method = ?, note = ?, date = ?
         WHERE id = ?",
        params![amount, category, payment_method, note, date, id],
    )?;
    Ok(rows)
}

/// Delete the row matching `id`; returns rows affected (0 when absent)
pub fn delete_expense(conn: &Connection, id: i64) -> Result<usize> {
    let rows = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;
    Ok(rows)
}

/// Point lookup by id
pub fn get_expense_by_id(conn: &Connection, id: i64) -> Result<Option<Expense>> {
    let result = conn.query_row(
        &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ?"),
        params![id],
        expense_from_row,
    );
    match result {
        Ok(expense) => Ok(Some(expense)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All expenses, newest first (date descending, id descending on ties)
pub fn list_all(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], expense_from_row)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Expenses with `start <= date <= end` (inclusive both ends), newest
/// first
///
/// Bounds are compared as strings; callers must supply zero-padded
/// ISO-8601 timestamps with a consistent timezone convention or the
/// filter silently misbehaves.
pub fn list_by_date_range(conn: &Connection, start: &str, end: &str) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE date >= ? AND date <= ?
         ORDER BY date DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![start, end], expense_from_row)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// The `limit` newest expenses, same ordering as [`list_all`]
pub fn list_recent(conn: &Connection, limit: u32) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date DESC, id DESC LIMIT ?"
    ))?;
    let rows = stmt.query_map(params![limit as i64], expense_from_row)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// All expenses ordered oldest first, for chronological export
pub fn export_all(conn: &Connection) -> Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses ORDER BY date ASC"
    ))?;
    let rows = stmt.query_map([], expense_from_row)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

// ============================================================================
// Aggregation queries
// ============================================================================

/// Sum of amounts over an inclusive date range (0.0 when no rows match)
pub fn total_in_range(conn: &Connection, start: &str, end: &str) -> Result<f64> {
    let total: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0.0) FROM expenses WHERE date >= ? AND date <= ?",
        params![start, end],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// Per-category sums over an inclusive date range, largest first
///
/// Categories without matching rows are omitted rather than reported
/// as zero.
pub fn totals_by_category(conn: &Connection, start: &str, end: &str) -> Result<Vec<CategoryTotal>> {
    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount) as total FROM expenses
         WHERE date >= ? AND date <= ?
         GROUP BY category ORDER BY total DESC",
    )?;
    let rows = stmt.query_map(params![start, end], |row| {
        Ok(CategoryTotal {
            category: row.get(0)?,
            total: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Per-calendar-day sums over an inclusive date range, oldest first
///
/// Days with no expenses are omitted; callers needing a dense series
/// fill the gaps themselves.
pub fn daily_totals(conn: &Connection, start: &str, end: &str) -> Result<Vec<DailyTotal>> {
    let mut stmt = conn.prepare(
        "SELECT date(date) as day, SUM(amount) as total FROM expenses
         WHERE date >= ? AND date <= ?
         GROUP BY date(date) ORDER BY day ASC",
    )?;
    let rows = stmt.query_map(params![start, end], |row| {
        Ok(DailyTotal {
            day: row.get(0)?,
            total: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Per-calendar-week sums over an inclusive date range, oldest first
pub fn weekly_totals(conn: &Connection, start: &str, end: &str) -> Result<Vec<WeeklyTotal>> {
    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-W%W', date) as week, SUM(amount) as total FROM expenses
         WHERE date >= ? AND date <= ?
         GROUP BY week ORDER BY week ASC",
    )?;
    let rows = stmt.query_map(params![start, end], |row| {
        Ok(WeeklyTotal {
            week: row.get(0)?,
            total: row.get(1)?,
        })
    })?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

// ============================================================================
// Settings queries
// ============================================================================

/// Get a setting value, `None` when the key is absent
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let result = conn.query_row(
        "SELECT value FROM settings WHERE key = ?",
        params![key],
        |row| row.get(0),
    );
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Upsert a setting value
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)",
        params![key, value],
    )?;
    Ok(())
}

/// Full settings snapshot
pub fn get_all_settings(conn: &Connection) -> Result<HashMap<String, String>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut settings = HashMap::new();
    for row in rows {
        let (key, value) = row?;
        settings.insert(key, value);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;

    fn migrated_connection() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        crate::database::migrations::run(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_now_timestamp_is_iso8601_utc() {
        let ts = now_timestamp();
        // e.g. 2026-08-06T10:15:30.123Z
        assert_eq!(ts.len(), 24);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let conn = migrated_connection();
        let ts = now_timestamp();

        let first = insert_expense(&conn, 10.0, "food", "cash", "", "2026-01-01", &ts).unwrap();
        let second = insert_expense(&conn, 20.0, "food", "cash", "", "2026-01-02", &ts).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_update_and_delete_report_rows_affected() {
        let conn = migrated_connection();
        let ts = now_timestamp();
        let id = insert_expense(&conn, 10.0, "food", "cash", "", "2026-01-01", &ts).unwrap();

        let updated = update_expense(&conn, id, 12.0, "food", "card", "lunch", "2026-01-01").unwrap();
        assert_eq!(updated, 1);
        let updated = update_expense(&conn, 9999, 12.0, "food", "card", "", "2026-01-01").unwrap();
        assert_eq!(updated, 0);

        assert_eq!(delete_expense(&conn, id).unwrap(), 1);
        assert_eq!(delete_expense(&conn, id).unwrap(), 0);
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let conn = migrated_connection();
        let ts = now_timestamp();
        for day in ["2026-01-01", "2026-01-02", "2026-01-03"] {
            insert_expense(&conn, 5.0, "food", "cash", "", day, &ts).unwrap();
        }

        let hits = list_by_date_range(&conn, "2026-01-01", "2026-01-03").unwrap();
        assert_eq!(hits.len(), 3);

        let hits = list_by_date_range(&conn, "2026-01-02", "2026-01-02").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, "2026-01-02");
    }

    #[test]
    fn test_daily_totals_truncate_to_calendar_day() {
        let conn = migrated_connection();
        let ts = now_timestamp();
        insert_expense(&conn, 10.0, "food", "cash", "", "2026-01-01T08:00:00.000Z", &ts).unwrap();
        insert_expense(&conn, 15.0, "food", "cash", "", "2026-01-01T21:30:00.000Z", &ts).unwrap();
        insert_expense(&conn, 7.0, "travel", "cash", "", "2026-01-03T12:00:00.000Z", &ts).unwrap();

        let days = daily_totals(&conn, "2026-01-01", "2026-01-04").unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, "2026-01-01");
        assert_eq!(days[0].total, 25.0);
        assert_eq!(days[1].day, "2026-01-03");
        assert_eq!(days[1].total, 7.0);
    }

    #[test]
    fn test_weekly_totals_group_by_week_key() {
        let conn = migrated_connection();
        let ts = now_timestamp();
        // Same ISO week
        insert_expense(&conn, 10.0, "food", "cash", "", "2026-03-03T10:00:00.000Z", &ts).unwrap();
        insert_expense(&conn, 20.0, "food", "cash", "", "2026-03-05T10:00:00.000Z", &ts).unwrap();
        // Two weeks later
        insert_expense(&conn, 40.0, "food", "cash", "", "2026-03-18T10:00:00.000Z", &ts).unwrap();

        let weeks = weekly_totals(&conn, "2026-03-01", "2026-03-31").unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].total, 30.0);
        assert_eq!(weeks[1].total, 40.0);
        assert!(weeks[0].week < weeks[1].week);
    }

    #[test]
    fn test_settings_snapshot_contains_schema_version() {
        let conn = migrated_connection();
        set_setting(&conn, "currency", "INR").unwrap();

        let all = get_all_settings(&conn).unwrap();
        assert_eq!(all.get("currency").map(String::as_str), Some("INR"));
        assert_eq!(
            all.get(crate::SCHEMA_VERSION_KEY).map(String::as_str),
            Some("2")
        );
    }

    #[test]
    fn test_schema_constants_parse() {
        // The raw constants must each be valid standalone SQL
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_SETTINGS_TABLE).unwrap();
        conn.execute_batch(schema::CREATE_EXPENSES_TABLE).unwrap();
        conn.execute_batch(schema::CREATE_DATE_INDEX).unwrap();
        conn.execute_batch(schema::CREATE_CATEGORY_INDEX).unwrap();
    }
}
