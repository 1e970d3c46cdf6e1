//! Database connection management

use std::path::{Path, PathBuf};

use log::debug;
use rusqlite::Connection;

use super::migrations;
use crate::error::Result;

/// Database connection wrapper
///
/// Opening a `Database` yields a ready handle: the file is created if
/// absent, WAL mode is enabled and all pending migrations have run.
pub struct Database {
    /// Path to the database file (empty for in-memory databases)
    path: PathBuf,
    /// SQLite connection
    conn: Connection,
}

impl Database {
    /// Open or create a database at the specified path and migrate it
    pub fn open(path: &Path) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        debug!("opened database at {}", path.display());
        Self::configure(&conn)?;
        migrations::run(&mut conn)?;
        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    /// Open a private in-memory database and migrate it
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        Self::configure(&conn)?;
        migrations::run(&mut conn)?;
        Ok(Self {
            path: PathBuf::new(),
            conn,
        })
    }

    /// Connection-level pragmas, applied before any statement runs
    fn configure(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(())
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get a mutable reference to the connection
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
