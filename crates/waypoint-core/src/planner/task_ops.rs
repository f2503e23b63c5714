//! Task operations for the Planner.
//!
//! Updates, batch reorders and deletes live on the [`TaskStore`]
//! implementation so task boards and direct callers share one path.
//!
//! [`TaskStore`]: crate::TaskStore

use super::Planner;
use crate::{
    error::Result,
    models::{NewTask, Task},
    params::{CreateTask, Id, SetTaskIntelligence},
};

impl Planner {
    /// Adds a task to a plan, appended or at `params.position`.
    pub async fn add_task(&self, params: &CreateTask) -> Result<Task> {
        let new = NewTask::try_from(params)?;
        self.insert_task(params.plan_id, new).await
    }

    /// Adds an already validated task, including its metadata.
    pub async fn insert_task(&self, plan_id: u64, new: NewTask) -> Result<Task> {
        self.run_blocking(move |db| db.add_task(plan_id, &new)).await
    }

    /// Retrieves a single task.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let task_id = params.id;
        self.run_blocking(move |db| db.get_task(task_id)).await
    }

    /// Retrieves the tasks of a plan ordered by position. An unknown plan
    /// yields an empty list.
    pub async fn get_tasks(&self, params: &Id) -> Result<Vec<Task>> {
        let plan_id = params.id;
        self.run_blocking(move |db| db.get_tasks(plan_id)).await
    }

    /// Replaces a task's estimates, difficulty, tools, prerequisites and
    /// tags.
    pub async fn set_task_intelligence(&self, params: &SetTaskIntelligence) -> Result<Task> {
        let task_id = params.id;
        let intelligence = params.intelligence.clone();
        self.run_blocking(move |db| db.set_task_intelligence(task_id, &intelligence))
            .await
    }
}
