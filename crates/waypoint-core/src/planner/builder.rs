//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::info;

use super::{Planner, DEFAULT_USER_ID};
use crate::{
    db::Database,
    error::{PlannerError, Result},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    user_id: Option<String>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            user_id: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the owner recorded on new plans (defaults to `local`).
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database directory cannot be
    /// created, `PlannerError::XdgDirectory` if no default location can be
    /// determined and `PlannerError::Database` if schema setup fails.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let user_id = self.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());
        let planner = Planner::new(db_path, user_id);

        // Open once so schema creation and migrations happen up front.
        planner.run_blocking(|_db: &mut Database| Ok(())).await?;
        info!("Using database at {}", planner.db_path.display());

        Ok(planner)
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
