//! Per-task edit lifecycle.
//!
//! ```text
//! Idle ──begin──▶ Pending(patch) ──commit────▶ Committed(patch)
//!                         │
//!                         └──roll_back──▶ RolledBack(reason)
//! ```
//!
//! Settled states accept a new `begin`, so a task can be edited again after
//! its previous edit settled either way.

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::TaskPatch,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    #[default]
    Idle,
    Pending { patch: TaskPatch },
    Committed { patch: TaskPatch },
    RolledBack { reason: String },
}

impl EditState {
    pub fn name(&self) -> &'static str {
        match self {
            EditState::Idle => "idle",
            EditState::Pending { .. } => "pending",
            EditState::Committed { .. } => "committed",
            EditState::RolledBack { .. } => "rolled_back",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, EditState::Pending { .. })
    }
}

/// The edit state of a single task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskEdit {
    task_id: u64,
    state: EditState,
}

impl TaskEdit {
    pub fn new(task_id: u64) -> Self {
        Self {
            task_id,
            state: EditState::Idle,
        }
    }

    pub fn task_id(&self) -> u64 {
        self.task_id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Starts an edit. Fails while another edit of the same task is pending.
    pub fn begin(&mut self, patch: TaskPatch) -> Result<()> {
        if self.state.is_pending() {
            return Err(self.invalid("pending"));
        }
        self.state = EditState::Pending { patch };
        Ok(())
    }

    /// Marks the pending edit as persisted and returns its patch.
    pub fn commit(&mut self) -> Result<TaskPatch> {
        match std::mem::take(&mut self.state) {
            EditState::Pending { patch } => {
                self.state = EditState::Committed {
                    patch: patch.clone(),
                };
                Ok(patch)
            }
            other => {
                self.state = other;
                Err(self.invalid("committed"))
            }
        }
    }

    /// Marks the pending edit as discarded and returns its patch.
    pub fn roll_back(&mut self, reason: impl Into<String>) -> Result<TaskPatch> {
        match std::mem::take(&mut self.state) {
            EditState::Pending { patch } => {
                self.state = EditState::RolledBack {
                    reason: reason.into(),
                };
                Ok(patch)
            }
            other => {
                self.state = other;
                Err(self.invalid("rolled_back"))
            }
        }
    }

    fn invalid(&self, to: &'static str) -> PlannerError {
        PlannerError::InvalidTransition {
            task_id: self.task_id,
            from: self.state.name(),
            to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;

    #[test]
    fn test_commit_path() {
        let mut edit = TaskEdit::new(7);
        let patch = TaskPatch::status(TaskStatus::Completed);

        edit.begin(patch.clone()).unwrap();
        assert!(edit.state().is_pending());
        assert_eq!(edit.commit().unwrap(), patch);
        assert_eq!(edit.state(), &EditState::Committed { patch });
    }

    #[test]
    fn test_rollback_path() {
        let mut edit = TaskEdit::new(7);
        edit.begin(TaskPatch::title("New")).unwrap();
        edit.roll_back("network down").unwrap();
        assert_eq!(
            edit.state(),
            &EditState::RolledBack {
                reason: "network down".to_string()
            }
        );

        // A settled edit can start over
        edit.begin(TaskPatch::title("Again")).unwrap();
        assert_eq!(edit.state().name(), "pending");
    }

    #[test]
    fn test_invalid_transitions() {
        let mut edit = TaskEdit::new(3);
        let err = edit.commit().unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidTransition { task_id: 3, from: "idle", to: "committed" }
        ));
        assert_eq!(edit.state(), &EditState::Idle);

        edit.begin(TaskPatch::title("x")).unwrap();
        assert!(edit.begin(TaskPatch::title("y")).is_err());
        edit.commit().unwrap();
        assert!(edit.roll_back("late").is_err());
        assert_eq!(edit.state().name(), "committed");
    }
}
