//! High-level planner API.
//!
//! [`Planner`] is the SQLite-backed [`TaskStore`] plus the plan-level
//! operations around it. It holds no open connection: every operation opens
//! the database on a blocking thread, does its work in a transaction and
//! closes it again.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │  (validation,   │───▶│ (plan_ops,      │───▶│   (via db/)     │
//! │   task boards)  │    │  task_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use waypoint_core::{params::{CreatePlan, CreateTask}, PlannerBuilder, TaskStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/waypoint.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Kitchen renovation".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! planner
//!     .add_task(&CreateTask {
//!         plan_id: plan.id,
//!         title: "Measure cabinets".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let tasks = planner.fetch_tasks(plan.id).await?;
//! assert_eq!(tasks.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use tokio::task;

pub mod builder;
pub mod handlers;
pub mod plan_ops;
pub mod task_ops;


pub use builder::PlannerBuilder;

use crate::{
    db::Database,
    error::{PlannerError, Result},
    models::{Task, TaskPatch},
    ordering::TaskOrder,
    store::TaskStore,
};

/// Owner recorded on plans when none is configured.
pub const DEFAULT_USER_ID: &str = "local";

/// Main planner interface for managing plans and tasks.
#[derive(Debug, Clone)]
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) user_id: String,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, user_id: String) -> Self {
        Self { db_path, user_id }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Owner recorded on newly created plans.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Runs a database operation on a blocking thread with its own
    /// connection.
    pub(crate) async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

#[async_trait]
impl TaskStore for Planner {
    async fn fetch_tasks(&self, plan_id: u64) -> Result<Vec<Task>> {
        self.run_blocking(move |db| db.fetch_plan_tasks(plan_id)).await
    }

    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task> {
        debug!("Updating task {task_id}");
        let patch = patch.clone();
        self.run_blocking(move |db| db.update_task(task_id, &patch))
            .await
    }

    async fn reorder_tasks(&self, orders: &[TaskOrder]) -> Result<()> {
        debug!("Persisting reorder batch of {} tasks", orders.len());
        let orders = orders.to_vec();
        self.run_blocking(move |db| db.reorder_tasks(&orders)).await
    }

    async fn delete_task(&self, task_id: u64) -> Result<()> {
        debug!("Deleting task {task_id}");
        self.run_blocking(move |db| db.delete_task(task_id)).await
    }
}
