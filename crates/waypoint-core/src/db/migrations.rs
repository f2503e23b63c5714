//! Database schema initialization and migrations.

use log::info;

use crate::error::{DatabaseResultExt, Result};

/// Columns added after the first release, with their definitions.
const ADDED_TASK_COLUMNS: &[(&str, &str)] = &[("tags", "TEXT NOT NULL DEFAULT '[]'")];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Brings databases created by older versions up to the current schema.
    fn apply_migrations(&self) -> Result<()> {
        for (column, definition) in ADDED_TASK_COLUMNS {
            let exists: bool = self
                .connection
                .query_row(
                    "SELECT COUNT(*) FROM pragma_table_info('tasks') WHERE name = ?1",
                    [column],
                    |row| row.get::<_, i64>(0),
                )
                .map(|count| count > 0)
                .db_context("Failed to inspect tasks table")?;

            if !exists {
                info!("Adding column '{column}' to tasks table");
                self.connection
                    .execute(
                        &format!("ALTER TABLE tasks ADD COLUMN {column} {definition}"),
                        [],
                    )
                    .db_context("Failed to migrate tasks table")?;
            }
        }

        Ok(())
    }
}
