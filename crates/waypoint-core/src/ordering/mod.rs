//! Task ordering engine.
//!
//! - [`reorder`]: splice-move of a single task and the resulting order batch
//! - [`prerequisites`]: prerequisite-aware sequencing and readiness
//! - [`aggregates`]: completion and estimate totals
//! - [`schedule`]: due-date classification
//!
//! Everything here is a pure function of a task slice. Persistence and
//! optimistic state live in [`crate::planner`] and [`crate::sync`].

pub mod aggregates;
pub mod prerequisites;
pub mod reorder;
pub mod schedule;

pub use aggregates::{
    completion_percentage, remaining_estimated_cost, remaining_estimated_time,
    total_estimated_cost, total_estimated_time, PlanProgress, TaskAggregates,
};
pub use prerequisites::{
    find_prerequisite_cycles, has_prerequisites, prerequisite_tasks, prerequisites_satisfied,
    remap_prerequisites, retain_known, sort_by_prerequisites, sort_by_prerequisites_strict,
};
pub use reorder::{
    apply_orders, apply_orders_remapped, is_contiguous, move_index, order_mapping, plan_move,
    plan_move_to, remove_and_compact, ReorderPlan, TaskOrder,
};
pub use schedule::{days_until_due, is_overdue, DueUrgency, RelativeDue};
