//! Display formatting functions and result types.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes are wrapped in newtypes so every interface (terminal, MCP)
//! renders the same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Format Functions│    │   Formatted     │
//! │  (Plan, Task)   │───▶│ & Result Types  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanSummaries, Tasks, Agenda)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`estimates`]: Human-readable estimates, costs and health scores
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use waypoint_core::{
//!     display::{format_cost, format_time_estimate, CreateResult, OperationStatus},
//!     models::Task,
//! };
//!
//! let task = Task::new(7, 1, "Order tiles", 0).with_estimates(Some(1.5), Some(1234.5));
//! let output = CreateResult::new(task).to_string();
//! assert!(output.contains("Created task with ID: 7"));
//! assert!(output.contains("1.5 hours"));
//!
//! assert_eq!(format_time_estimate(Some(0.5)), "30 min");
//! assert_eq!(format_cost(Some(1234.5)), "$1,234.5");
//!
//! let status = OperationStatus::success("Task moved".to_string());
//! assert_eq!(status.to_string(), "Success: Task moved\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod estimates;
pub mod models;
pub mod results;
pub mod status;

// Re-export commonly used types
pub use collections::{Agenda, PlanSummaries, Tasks};
pub use datetime::{DueLabel, LocalDateTime};
pub use estimates::{difficulty_label, format_cost, format_time_estimate, health_label};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
