//! Core library for the Waypoint task planner.
//!
//! Plans hold ordered tasks. Each task's `order` is its 0-based position in
//! the plan, and prerequisites refer to sibling tasks by that order. This
//! crate keeps those orders unique and contiguous, and keeps prerequisite
//! references pointing at the same tasks whenever the list is reordered or
//! shrinks.
//!
//! # Layers
//!
//! - [`ordering`]: pure functions over task slices (splice moves, batch
//!   orders, prerequisite sequencing, aggregates, due dates)
//! - [`sync`]: optimistic task lists with commit and rollback, driven
//!   against a [`TaskStore`]
//! - [`planner`]: the SQLite-backed store and plan-level operations
//! - [`display`]: markdown formatting shared by the CLI and MCP server
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{
//!     params::{CreatePlan, CreateTask, MoveTask},
//!     PlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Move house".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! for title in ["Pack", "Hire van", "Book cleaners"] {
//!     planner
//!         .add_task(&CreateTask {
//!             plan_id: plan.id,
//!             title: title.to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//! }
//!
//! // Drag "Book cleaners" to the top.
//! let (settlement, tasks) = planner
//!     .move_task(&MoveTask {
//!         plan_id: plan.id,
//!         source: 2,
//!         destination: Some(0),
//!     })
//!     .await?;
//! assert!(settlement.is_committed());
//! assert_eq!(tasks[0].title, "Book cleaners");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod ordering;
pub mod params;
pub mod planner;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Agenda, CreateResult, DeleteResult, OperationStatus, PlanSummaries, Tasks, UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{
    Difficulty, NewTask, Plan, PlanFilter, PlanStats, PlanStatus, PlanSummary, Resource,
    ResourceType, Task, TaskIntelligence, TaskPatch, TaskStatus,
};
pub use ordering::{PlanProgress, TaskOrder};
pub use planner::{Planner, PlannerBuilder};
pub use store::TaskStore;
pub use sync::{EditState, Notice, Settlement, TaskBoard, TaskListState};
