//! Database schema definitions

/// SQL to create the settings table
///
/// Must exist before anything else: the schema version lives here, so
/// migrations read it before touching the expenses table.
pub const CREATE_SETTINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    key             TEXT NOT NULL PRIMARY KEY,
    value           TEXT NOT NULL
)
"#;

/// SQL to create the expenses table
pub const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    amount          REAL NOT NULL,
    category        TEXT NOT NULL,
    payment_method  TEXT NOT NULL DEFAULT 'cash',
    note            TEXT DEFAULT '',
    date            TEXT NOT NULL,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

/// Index backing date-range filters and ordered listings
pub const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date)";

/// Index backing per-category grouping
pub const CREATE_CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category)";
