//! Optimistic task lists.
//!
//! [`TaskListState`] is the snapshot-plus-pending container, [`TaskEdit`]
//! tracks one task's inline edit and [`TaskBoard`] wires both to a
//! [`TaskStore`](crate::store::TaskStore).

pub mod board;
pub mod edit;
pub mod state;

pub use board::{Notice, Settlement, TaskBoard};
pub use edit::{EditState, TaskEdit};
pub use state::{Mutation, MutationId, TaskListState};
