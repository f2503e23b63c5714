//! Handler operations that validate loosely typed parameters and return
//! display-ready wrapper types for the Planner.

use log::info;

use super::Planner;
use crate::{
    display::{PlanSummaries, Tasks},
    error::{PlannerError, Result},
    models::{Plan, PlanFilter, PlanSummary, Task},
    ordering::{
        prerequisites_satisfied, sort_by_prerequisites, sort_by_prerequisites_strict,
        PlanProgress,
    },
    params::{DeletePlan, Id, ListPlans, MoveTask, ShowProgress, SortTasks, UpdateTask},
    store::TaskStore,
    sync::{Settlement, TaskBoard},
};

impl Planner {
    /// Handle listing plans as summaries with task counts and totals.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `params.status` is not a
    /// known plan status.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use waypoint_core::{params::ListPlans, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let summaries = planner.list_plans_summary(&ListPlans::default()).await?;
    /// # Result::<(), waypoint_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn list_plans_summary(&self, params: &ListPlans) -> Result<PlanSummaries> {
        let filter = PlanFilter::try_from(params)?;
        let plans = self.list_plans(filter).await?;
        let summaries: Vec<PlanSummary> = plans.iter().map(Into::into).collect();
        Ok(PlanSummaries(summaries))
    }

    /// Handle showing a complete plan with its tasks and resources.
    pub async fn show_plan(&self, params: &Id) -> Result<Option<Plan>> {
        self.get_plan(params).await
    }

    /// Handle permanent plan deletion.
    ///
    /// Deletion must be confirmed explicitly. The plan is fetched first so
    /// the caller can report what was removed; `None` means it did not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if `params.confirmed` is false.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<Plan>> {
        if !params.confirmed {
            return Err(PlannerError::invalid_input("confirmed")
                .with_reason("Deleting a plan removes all of its tasks. Set confirmed to proceed"));
        }

        let id = Id { id: params.id };
        let Some(plan) = self.get_plan(&id).await? else {
            return Ok(None);
        };
        self.delete_plan_by_id(&id).await?;
        info!("Deleted plan {} with {} tasks", plan.id, plan.tasks.len());
        Ok(Some(plan))
    }

    /// Handle a task update from loosely typed fields.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for an unparseable status or due
    /// date, or when no field is set, and `PlannerError::TaskNotFound` for
    /// an unknown task.
    pub async fn update_task_validated(&self, params: &UpdateTask) -> Result<Task> {
        let patch = params.validate()?;
        self.update_task(params.id, &patch).await
    }

    /// Handle a drag-style move within a plan.
    ///
    /// Runs the move through a [`TaskBoard`], so a rejected move comes back
    /// as [`Settlement::RolledBack`] instead of an error. Moves that change
    /// nothing are [`Settlement::Skipped`] without touching the database.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` if the plan does not exist.
    pub async fn move_task(&self, params: &MoveTask) -> Result<(Settlement, Vec<Task>)> {
        let mut board = TaskBoard::load(self, params.plan_id).await?;
        let settlement = board.move_task(params.source, params.destination).await;
        Ok((settlement, board.tasks()))
    }

    /// Handle removing a single task, reporting what was removed.
    pub async fn remove_task(&self, params: &Id) -> Result<Option<Task>> {
        let Some(task) = self.get_task(params).await? else {
            return Ok(None);
        };
        self.delete_task(task.id).await?;
        Ok(Some(task))
    }

    /// Handle listing a plan's tasks in execution order.
    ///
    /// Prerequisites come before the tasks that need them. In lenient mode
    /// dangling references are ignored and cycles are broken at the first
    /// task reached; in strict mode a cycle is an error.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::PlanNotFound` for an unknown plan and, with
    /// `strict`, `PlannerError::PrerequisiteCycle` naming the orders
    /// involved.
    pub async fn sorted_tasks(&self, params: &SortTasks) -> Result<Tasks> {
        let tasks = self.fetch_tasks(params.plan_id).await?;
        let sorted = if params.strict {
            sort_by_prerequisites_strict(&tasks)?
        } else {
            sort_by_prerequisites(&tasks)
        };
        Ok(Tasks(sorted))
    }

    /// Handle listing open tasks whose prerequisites are all completed, in
    /// execution order.
    pub async fn ready_tasks(&self, params: &Id) -> Result<Tasks> {
        let tasks = self.fetch_tasks(params.id).await?;
        let ready = sort_by_prerequisites(&tasks)
            .into_iter()
            .filter(|t| !t.status.is_completed() && prerequisites_satisfied(t, &tasks))
            .collect();
        Ok(Tasks(ready))
    }

    /// Handle computing a plan's progress report.
    ///
    /// `params.today` overrides the current local date, which keeps reports
    /// reproducible.
    pub async fn plan_progress(&self, params: &ShowProgress) -> Result<PlanProgress> {
        let today = params.today()?;
        let tasks = self.fetch_tasks(params.plan_id).await?;
        Ok(PlanProgress::compute(params.plan_id, &tasks, today))
    }
}
