//! The persistence boundary of a task list.
//!
//! A [`TaskStore`] is the authoritative owner of a plan's tasks. The
//! optimistic [`TaskBoard`](crate::sync::TaskBoard) talks to it exclusively
//! through this trait, which keeps the board testable against in-memory or
//! deliberately failing stores. [`Planner`](crate::Planner) is the SQLite
//! implementation.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Task, TaskPatch},
    ordering::TaskOrder,
};

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks of a plan, sorted by order.
    async fn fetch_tasks(&self, plan_id: u64) -> Result<Vec<Task>>;

    /// Applies a partial update and returns the stored task.
    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task>;

    /// Persists a batch of new orders. Either every entry is applied or none.
    async fn reorder_tasks(&self, orders: &[TaskOrder]) -> Result<()>;

    /// Removes a task, closing the gap it leaves in its plan's order.
    async fn delete_task(&self, task_id: u64) -> Result<()>;
}

#[async_trait]
impl<S: TaskStore + ?Sized> TaskStore for &S {
    async fn fetch_tasks(&self, plan_id: u64) -> Result<Vec<Task>> {
        (**self).fetch_tasks(plan_id).await
    }

    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task> {
        (**self).update_task(task_id, patch).await
    }

    async fn reorder_tasks(&self, orders: &[TaskOrder]) -> Result<()> {
        (**self).reorder_tasks(orders).await
    }

    async fn delete_task(&self, task_id: u64) -> Result<()> {
        (**self).delete_task(task_id).await
    }
}
