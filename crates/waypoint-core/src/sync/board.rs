//! Optimistic task board in front of a [`TaskStore`].
//!
//! Every gesture follows the same shape: compute the new local state, show
//! it, send exactly one store request, then settle. A successful request is
//! committed into the confirmed snapshot; a failed one is rolled back and
//! reported as a [`Notice`]. Either way the board re-fetches from the store
//! afterwards so the confirmed snapshot tracks the store.

use std::{collections::HashMap, fmt};

use jiff::civil::Date;
use log::{debug, warn};

use super::{EditState, Mutation, MutationId, TaskEdit, TaskListState};
use crate::{
    error::{PlannerError, Result},
    models::{Task, TaskPatch, TaskStatus},
    ordering::{plan_move, sort_by_prerequisites, PlanProgress},
    store::TaskStore,
};

/// Non-fatal report of a change that could not be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// What the user tried to do
    pub action: String,
    /// Why it failed
    pub reason: String,
    /// Whether the failure came from the store rather than the request
    pub transient: bool,
    /// Whether reloading the tasks afterwards failed too, so the confirmed
    /// snapshot may not match the store
    pub stale: bool,
}

impl Notice {
    fn from_error(action: impl Into<String>, error: &PlannerError) -> Self {
        Self {
            action: action.into(),
            reason: error.to_string(),
            transient: error.is_persistence_failure(),
            stale: false,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not {}; changes were reverted ({})", self.action, self.reason)?;
        if self.stale {
            write!(f, "; tasks could not be reloaded and may be out of date")?;
        }
        Ok(())
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The store accepted the change
    Committed,
    /// Nothing to do; no request was sent
    Skipped,
    /// The store rejected the change and the board reverted it
    RolledBack(Notice),
}

impl Settlement {
    pub fn is_committed(&self) -> bool {
        matches!(self, Settlement::Committed)
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Settlement::RolledBack(notice) => Some(notice),
            _ => None,
        }
    }
}

/// Optimistic view of one plan's task list.
pub struct TaskBoard<S> {
    store: S,
    plan_id: u64,
    state: TaskListState,
    edits: HashMap<u64, TaskEdit>,
    stale: bool,
}

impl<S: TaskStore> TaskBoard<S> {
    /// Fetches the plan's tasks and starts from them as the confirmed
    /// snapshot.
    pub async fn load(store: S, plan_id: u64) -> Result<Self> {
        let tasks = store.fetch_tasks(plan_id).await?;
        debug!("Loaded task board for plan {plan_id} with {} tasks", tasks.len());
        Ok(Self {
            store,
            plan_id,
            state: TaskListState::new(tasks),
            edits: HashMap::new(),
            stale: false,
        })
    }

    pub fn plan_id(&self) -> u64 {
        self.plan_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The tasks as currently shown, including unsettled changes.
    pub fn tasks(&self) -> Vec<Task> {
        self.state.view()
    }

    /// The last snapshot confirmed by the store.
    pub fn confirmed(&self) -> &[Task] {
        self.state.confirmed()
    }

    /// Whether the last reload from the store failed. The confirmed
    /// snapshot is then the one from before that reload.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Tasks in prerequisite order.
    pub fn sorted(&self) -> Vec<Task> {
        sort_by_prerequisites(&self.tasks())
    }

    pub fn progress(&self, today: Date) -> PlanProgress {
        PlanProgress::compute(self.plan_id, &self.tasks(), today)
    }

    /// Edit state of a task; tasks never edited are idle.
    pub fn edit_state(&self, task_id: u64) -> EditState {
        self.edits
            .get(&task_id)
            .map(|edit| edit.state().clone())
            .unwrap_or_default()
    }

    /// Drag-and-drop move of the task at `source` to `destination`.
    ///
    /// A cancelled drag (`None`), an unchanged position or an index out of
    /// range is [`Settlement::Skipped`].
    pub async fn move_task(&mut self, source: usize, destination: Option<usize>) -> Settlement {
        let Some(plan) = plan_move(&self.tasks(), source, destination) else {
            debug!("Ignoring no-op move {source} -> {destination:?} in plan {}", self.plan_id);
            return Settlement::Skipped;
        };

        let id = self.state.apply(Mutation::Reorder {
            orders: plan.orders.clone(),
        });
        let outcome = self.store.reorder_tasks(&plan.orders).await;
        self.settle(id, outcome, "reorder tasks").await
    }

    /// Toggles a task's status.
    pub async fn set_status(&mut self, task_id: u64, status: TaskStatus) -> Settlement {
        self.edit_task(task_id, TaskPatch::status(status)).await
    }

    /// Applies an inline edit to a task.
    pub async fn edit_task(&mut self, task_id: u64, patch: TaskPatch) -> Settlement {
        if patch.is_empty() || !self.tasks().iter().any(|t| t.id == task_id) {
            return Settlement::Skipped;
        }

        let edit = self
            .edits
            .entry(task_id)
            .or_insert_with(|| TaskEdit::new(task_id));
        if let Err(e) = edit.begin(patch.clone()) {
            warn!("Refusing edit of task {task_id}: {e}");
            return Settlement::Skipped;
        }

        let id = self.state.apply(Mutation::Update {
            task_id,
            patch: patch.clone(),
        });
        let outcome = self.store.update_task(task_id, &patch).await.map(|_| ());
        let settlement = self.settle(id, outcome, "update task").await;

        if let Some(edit) = self.edits.get_mut(&task_id) {
            let transition = match &settlement {
                Settlement::RolledBack(notice) => edit.roll_back(notice.reason.clone()).map(|_| ()),
                _ => edit.commit().map(|_| ()),
            };
            if let Err(e) = transition {
                warn!("Edit state of task {task_id} out of step: {e}");
            }
        }
        settlement
    }

    /// Deletes a task; later tasks move up by one.
    pub async fn delete_task(&mut self, task_id: u64) -> Settlement {
        if !self.tasks().iter().any(|t| t.id == task_id) {
            return Settlement::Skipped;
        }

        let id = self.state.apply(Mutation::Delete { task_id });
        let outcome = self.store.delete_task(task_id).await;
        let settlement = self.settle(id, outcome, "delete task").await;
        if settlement.is_committed() {
            self.edits.remove(&task_id);
        }
        settlement
    }

    /// Re-fetches the confirmed snapshot from the store.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.store.fetch_tasks(self.plan_id).await {
            Ok(tasks) => {
                self.state.reconcile(tasks);
                self.stale = false;
                Ok(())
            }
            Err(e) => {
                warn!("Could not refresh tasks of plan {}: {e}", self.plan_id);
                self.stale = true;
                Err(e)
            }
        }
    }

    async fn settle(&mut self, id: MutationId, outcome: Result<()>, action: &str) -> Settlement {
        let mut settlement = match outcome {
            Ok(()) => {
                self.state.commit(id);
                Settlement::Committed
            }
            Err(e) => {
                let discarded = self.state.rollback();
                warn!(
                    "Rolled back {discarded} pending change(s) of plan {} after failed {action}: {e}",
                    self.plan_id
                );
                Settlement::RolledBack(Notice::from_error(action, &e))
            }
        };

        // The refresh error is already logged and the snapshot kept.
        if self.refresh().await.is_err() {
            if let Settlement::RolledBack(notice) = &mut settlement {
                notice.stale = true;
            }
        }
        settlement
    }
}
