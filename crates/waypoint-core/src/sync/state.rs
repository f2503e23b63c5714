//! Confirmed snapshot plus pending mutations.
//!
//! The visible task list is always the confirmed snapshot with every pending
//! mutation replayed over it, in the order they were applied. Rolling back
//! drops the pending mutations, so the view becomes the confirmed snapshot
//! again with nothing merged in.

use serde::{Deserialize, Serialize};

use crate::{
    models::{Task, TaskPatch},
    ordering::{apply_orders_remapped, plan_move_to, remove_and_compact, TaskOrder},
};

/// Handle of a mutation that has been applied but not yet settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MutationId(u64);

/// A local change to a task list that mirrors one store request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// A batch of new orders, as produced by a move
    Reorder { orders: Vec<TaskOrder> },
    /// A partial update of one task
    Update { task_id: u64, patch: TaskPatch },
    /// Removal of one task
    Delete { task_id: u64 },
}

impl Mutation {
    /// Applies the mutation to a snapshot the way the store would.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        match self {
            Mutation::Reorder { orders } => apply_orders_remapped(tasks, orders),
            Mutation::Update { task_id, patch } => {
                // A new order is a move, everything else edits in place.
                let mut result = match patch.order {
                    Some(order) => plan_move_to(tasks, *task_id, order)
                        .map(|plan| apply_orders_remapped(tasks, &plan.orders))
                        .unwrap_or_else(|| tasks.to_vec()),
                    None => tasks.to_vec(),
                };
                if let Some(task) = result.iter_mut().find(|t| t.id == *task_id) {
                    let in_place = TaskPatch {
                        order: None,
                        ..patch.clone()
                    };
                    in_place.apply_to(task);
                }
                result
            }
            Mutation::Delete { task_id } => remove_and_compact(tasks, *task_id),
        }
    }
}

/// Explicit optimistic state container for one plan's task list.
#[derive(Debug, Clone, Default)]
pub struct TaskListState {
    confirmed: Vec<Task>,
    pending: Vec<(MutationId, Mutation)>,
    next_id: u64,
}

impl TaskListState {
    /// Starts from a snapshot confirmed by the store.
    pub fn new(mut confirmed: Vec<Task>) -> Self {
        confirmed.sort_by_key(|t| t.order);
        Self {
            confirmed,
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// The last snapshot confirmed by the store.
    pub fn confirmed(&self) -> &[Task] {
        &self.confirmed
    }

    /// Mutations applied locally but not settled yet.
    pub fn pending(&self) -> impl Iterator<Item = &Mutation> {
        self.pending.iter().map(|(_, m)| m)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The optimistic task list.
    pub fn view(&self) -> Vec<Task> {
        self.pending
            .iter()
            .fold(self.confirmed.clone(), |tasks, (_, mutation)| {
                mutation.apply(&tasks)
            })
    }

    /// Records a local mutation; the view reflects it immediately.
    pub fn apply(&mut self, mutation: Mutation) -> MutationId {
        let id = MutationId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, mutation));
        id
    }

    /// Folds a settled mutation into the confirmed snapshot.
    ///
    /// Returns `false` when `id` is not pending, for instance because a
    /// rollback already discarded it.
    pub fn commit(&mut self, id: MutationId) -> bool {
        let Some(index) = self.pending.iter().position(|(pending, _)| *pending == id) else {
            return false;
        };
        let (_, mutation) = self.pending.remove(index);
        self.confirmed = mutation.apply(&self.confirmed);
        true
    }

    /// Discards every pending mutation. Afterwards the view equals the
    /// confirmed snapshot exactly.
    pub fn rollback(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }

    /// Replaces the confirmed snapshot with a fresh copy from the store.
    /// Pending mutations are kept and replayed over it.
    pub fn reconcile(&mut self, mut server: Vec<Task>) {
        server.sort_by_key(|t| t.order);
        self.confirmed = server;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::TaskStatus, ordering::plan_move};

    fn snapshot() -> Vec<Task> {
        ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, title)| Task::new(i as u64 + 1, 1, *title, i as u32))
            .collect()
    }

    fn titles(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_view_replays_pending() {
        let mut state = TaskListState::new(snapshot());
        let plan = plan_move(state.confirmed(), 0, Some(2)).unwrap();
        state.apply(Mutation::Reorder {
            orders: plan.orders.clone(),
        });

        assert_eq!(titles(&state.view()), ["B", "C", "A", "D"]);
        assert_eq!(titles(state.confirmed()), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_rollback_restores_confirmed_exactly() {
        let confirmed = snapshot();
        let mut state = TaskListState::new(confirmed.clone());
        let plan = plan_move(&confirmed, 3, Some(0)).unwrap();
        state.apply(Mutation::Reorder { orders: plan.orders });
        state.apply(Mutation::Update {
            task_id: 2,
            patch: TaskPatch::status(TaskStatus::Completed),
        });

        assert_eq!(state.rollback(), 2);
        assert_eq!(state.view(), confirmed);
        assert!(!state.has_pending());
    }

    #[test]
    fn test_commit_folds_into_confirmed() {
        let mut state = TaskListState::new(snapshot());
        let id = state.apply(Mutation::Delete { task_id: 2 });
        assert!(state.commit(id));
        assert!(!state.commit(id));

        assert_eq!(titles(state.confirmed()), ["A", "C", "D"]);
        assert_eq!(state.view(), state.confirmed());
    }

    #[test]
    fn test_update_with_order_moves_task() {
        let mut state = TaskListState::new(snapshot());
        state.apply(Mutation::Update {
            task_id: 4,
            patch: TaskPatch {
                order: Some(0),
                title: Some("D!".to_string()),
                ..Default::default()
            },
        });
        let view = state.view();
        assert_eq!(titles(&view), ["D!", "A", "B", "C"]);
        assert_eq!(view[0].order, 0);
    }

    #[test]
    fn test_reconcile_keeps_pending() {
        let mut state = TaskListState::new(snapshot());
        state.apply(Mutation::Update {
            task_id: 1,
            patch: TaskPatch::title("Renamed"),
        });

        let mut server = snapshot();
        server[3].title = "D (server)".to_string();
        state.reconcile(server);

        let view = state.view();
        assert_eq!(view[0].title, "Renamed");
        assert_eq!(view[3].title, "D (server)");
    }
}
