//! SQLite storage for plans, tasks and resources.
//!
//! Every method runs synchronously on its own connection; the async
//! [`Planner`](crate::Planner) moves them onto blocking threads.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod plan_queries;
mod rows;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and brings the schema up to date.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
