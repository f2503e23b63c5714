//! Data models for plans, tasks and resources.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so the structures stay free of presentation
//! logic. Derived values such as completion percentage are never stored on
//! the models; see [`crate::ordering::aggregates`].
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{Task, TaskStatus};
//!
//! let task = Task::new(1, 7, "Book venue", 0)
//!     .with_status(TaskStatus::InProgress)
//!     .with_prerequisites(vec![2]);
//! assert!(task.to_string().contains("➤ In Progress"));
//! ```

pub mod filters;
pub mod intelligence;
pub mod plan;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;


pub use filters::PlanFilter;
pub use intelligence::{Difficulty, TaskIntelligence};
pub use plan::{Plan, Resource};
pub use requests::{NewTask, TaskPatch};
pub use status::{PlanStatus, ResourceType, TaskStatus};
pub use summary::{PlanStats, PlanSummary};
pub use task::Task;
