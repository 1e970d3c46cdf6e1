//! Database layer for the expense store
//!
//! Handles SQLite database operations including:
//! - Schema creation and versioned migrations
//! - CRUD queries for expenses and settings
//! - Aggregation queries over date ranges

pub mod connection;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod schema;

pub use connection::Database;
pub use models::*;
