//! Error types for the waypoint library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Task not found for the given ID
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Prerequisites that form a cycle, reported by the strict resolver
    #[error("Prerequisite cycle between tasks at orders {}", format_orders(.orders))]
    PrerequisiteCycle { orders: Vec<u32> },
    /// An edit state machine was driven through a transition it does not allow
    #[error("Invalid edit transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        task_id: u64,
        from: &'static str,
        to: &'static str,
    },
    /// A task store rejected or failed a persistence request
    #[error("Task store error: {message}")]
    Store { message: String },
}

fn format_orders(orders: &[u32]) -> String {
    orders
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a store error from any displayable cause.
    pub fn store(message: impl Into<String>) -> Self {
        PlannerError::Store {
            message: message.into(),
        }
    }

    /// Whether the failure came from the persistence layer rather than from
    /// the request itself. Task boards roll back on these.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            PlannerError::Database { .. }
                | PlannerError::FileSystem { .. }
                | PlannerError::Store { .. }
                | PlannerError::Configuration { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;
