//! Drag-and-drop reordering.
//!
//! A move is a list splice: the task at `source` is removed and reinserted at
//! `destination`, and every task between the two positions shifts by one.
//! The result is expressed as a batch of `(task_id, new_order)` pairs that
//! covers every task, so the store can persist it in a single call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::prerequisites::remap_prerequisites;
use crate::models::Task;

/// A single entry of a reorder batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TaskOrder {
    pub task_id: u64,
    pub new_order: u32,
}

impl TaskOrder {
    pub fn new(task_id: u64, new_order: u32) -> Self {
        Self { task_id, new_order }
    }
}

/// Outcome of a valid move: the reordered list and the batch describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan {
    /// Tasks in their new positions, with `order` rewritten to `0..N`
    pub tasks: Vec<Task>,
    /// One entry per task, in list order
    pub orders: Vec<TaskOrder>,
}

/// Computes the splice-move of `source` to `destination`.
///
/// Returns `None` for every no-op: a cancelled drag (`destination` is
/// `None`), `source == destination`, an index out of range, or a list with
/// fewer than two tasks. No request should be sent in that case.
///
/// ```rust
/// use waypoint_core::{models::Task, ordering::plan_move};
///
/// let tasks: Vec<Task> = ["A", "B", "C", "D"]
///     .iter()
///     .enumerate()
///     .map(|(i, t)| Task::new(i as u64 + 1, 1, *t, i as u32))
///     .collect();
///
/// let plan = plan_move(&tasks, 0, Some(2)).unwrap();
/// let titles: Vec<_> = plan.tasks.iter().map(|t| t.title.as_str()).collect();
/// assert_eq!(titles, ["B", "C", "A", "D"]);
/// assert_eq!(plan.orders[2].task_id, 1);
/// assert_eq!(plan.orders[2].new_order, 2);
///
/// assert!(plan_move(&tasks, 1, None).is_none());
/// assert!(plan_move(&tasks, 1, Some(1)).is_none());
/// ```
pub fn plan_move(tasks: &[Task], source: usize, destination: Option<usize>) -> Option<ReorderPlan> {
    let destination = destination?;
    let len = tasks.len();
    if len < 2 || source == destination || source >= len || destination >= len {
        return None;
    }

    let mut moved = tasks.to_vec();
    move_index(&mut moved, source, destination);

    let orders = moved
        .iter_mut()
        .enumerate()
        .map(|(index, task)| {
            task.order = index as u32;
            TaskOrder::new(task.id, task.order)
        })
        .collect();

    Some(ReorderPlan {
        tasks: moved,
        orders,
    })
}

/// Moves the task with `task_id` to position `new_order`.
///
/// A target past the end is clamped to the last position. Returns `None`
/// when the task is unknown or already sits at that position.
pub fn plan_move_to(tasks: &[Task], task_id: u64, new_order: u32) -> Option<ReorderPlan> {
    let source = tasks.iter().position(|t| t.id == task_id)?;
    let last = tasks.len().checked_sub(1)?;
    let destination = (new_order as usize).min(last);
    plan_move(tasks, source, Some(destination))
}

/// Splice-moves one element of a vector. Both indices must be in range.
pub fn move_index<T>(items: &mut Vec<T>, source: usize, destination: usize) {
    let item = items.remove(source);
    items.insert(destination, item);
}

/// Applies a reorder batch to a snapshot and returns it sorted by order.
///
/// Tasks the batch does not mention keep their current order; entries for
/// unknown task IDs are ignored.
pub fn apply_orders(tasks: &[Task], orders: &[TaskOrder]) -> Vec<Task> {
    let mut result = tasks.to_vec();
    for entry in orders {
        if let Some(task) = result.iter_mut().find(|t| t.id == entry.task_id) {
            task.order = entry.new_order;
        }
    }
    result.sort_by_key(|t| t.order);
    result
}

/// [`apply_orders`] followed by rewriting prerequisite references, so every
/// reference keeps pointing at the same task.
pub fn apply_orders_remapped(tasks: &[Task], orders: &[TaskOrder]) -> Vec<Task> {
    let mapping: HashMap<u32, Option<u32>> = order_mapping(tasks, orders)
        .into_iter()
        .map(|(old, new)| (old, Some(new)))
        .collect();
    let mut result = apply_orders(tasks, orders);
    remap_prerequisites(&mut result, &mapping);
    result
}

/// Removes a task and closes the gap it leaves.
///
/// Remaining tasks are renumbered `0..N` in their current order, references
/// to the removed task are dropped and other references follow their task.
/// An unknown `task_id` returns the list unchanged.
pub fn remove_and_compact(tasks: &[Task], task_id: u64) -> Vec<Task> {
    let Some(removed) = tasks.iter().find(|t| t.id == task_id) else {
        return tasks.to_vec();
    };

    let mut remaining: Vec<Task> = tasks.iter().filter(|t| t.id != task_id).cloned().collect();
    remaining.sort_by_key(|t| t.order);

    let mut mapping: HashMap<u32, Option<u32>> = HashMap::from([(removed.order, None)]);
    for (index, task) in remaining.iter_mut().enumerate() {
        mapping.insert(task.order, Some(index as u32));
        task.order = index as u32;
    }
    remap_prerequisites(&mut remaining, &mapping);
    remaining
}

/// Old order to new order for every task named in a batch.
pub fn order_mapping(tasks: &[Task], orders: &[TaskOrder]) -> Vec<(u32, u32)> {
    orders
        .iter()
        .filter_map(|entry| {
            tasks
                .iter()
                .find(|t| t.id == entry.task_id)
                .map(|t| (t.order, entry.new_order))
        })
        .collect()
}

/// Whether the tasks' orders, sorted, are exactly `0..N`.
pub fn is_contiguous(tasks: &[Task]) -> bool {
    let mut orders: Vec<u32> = tasks.iter().map(|t| t.order).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(i, o)| *o == i as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(names: &[&str]) -> Vec<Task> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Task::new(i as u64 + 10, 1, *name, i as u32))
            .collect()
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_move_forward() {
        let tasks = letters(&["A", "B", "C", "D"]);
        let plan = plan_move(&tasks, 0, Some(2)).expect("valid move");

        assert_eq!(titles(&plan.tasks), ["B", "C", "A", "D"]);
        let expected = vec![
            TaskOrder::new(11, 0),
            TaskOrder::new(12, 1),
            TaskOrder::new(10, 2),
            TaskOrder::new(13, 3),
        ];
        assert_eq!(plan.orders, expected);
    }

    #[test]
    fn test_move_backward() {
        let tasks = letters(&["A", "B", "C", "D"]);
        let plan = plan_move(&tasks, 3, Some(1)).expect("valid move");
        assert_eq!(titles(&plan.tasks), ["A", "D", "B", "C"]);
        assert!(is_contiguous(&plan.tasks));
    }

    #[test]
    fn test_noop_moves() {
        let tasks = letters(&["A", "B", "C"]);
        assert!(plan_move(&tasks, 0, None).is_none());
        assert!(plan_move(&tasks, 2, Some(2)).is_none());
        assert!(plan_move(&tasks, 3, Some(0)).is_none());
        assert!(plan_move(&tasks, 0, Some(3)).is_none());
        assert!(plan_move(&letters(&["A"]), 0, Some(0)).is_none());
        assert!(plan_move(&[], 0, Some(0)).is_none());
    }

    #[test]
    fn test_move_keeps_identity() {
        let tasks = letters(&["A", "B", "C"]);
        let plan = plan_move(&tasks, 2, Some(0)).expect("valid move");
        for task in &tasks {
            let moved = plan
                .tasks
                .iter()
                .find(|t| t.id == task.id)
                .expect("task survives the move");
            assert_eq!(moved.title, task.title);
        }
    }

    #[test]
    fn test_apply_orders_replays_batch() {
        let tasks = letters(&["A", "B", "C", "D"]);
        let plan = plan_move(&tasks, 1, Some(3)).expect("valid move");
        let replayed = apply_orders(&tasks, &plan.orders);
        assert_eq!(replayed, plan.tasks);
    }

    #[test]
    fn test_apply_orders_ignores_unknown_ids() {
        let tasks = letters(&["A", "B"]);
        let replayed = apply_orders(&tasks, &[TaskOrder::new(999, 0)]);
        assert_eq!(replayed, tasks);
    }

    #[test]
    fn test_move_to_order() {
        let tasks = letters(&["A", "B", "C"]);
        let plan = plan_move_to(&tasks, 10, 7).expect("clamped move");
        assert_eq!(titles(&plan.tasks), ["B", "C", "A"]);
        assert!(plan_move_to(&tasks, 11, 1).is_none());
        assert!(plan_move_to(&tasks, 404, 0).is_none());
    }

    #[test]
    fn test_prerequisites_follow_moved_tasks() {
        let mut tasks = letters(&["A", "B", "C"]);
        tasks[2].prerequisites = vec![0];
        let plan = plan_move(&tasks, 0, Some(2)).expect("valid move");
        let moved = apply_orders_remapped(&tasks, &plan.orders);

        assert_eq!(titles(&moved), ["B", "C", "A"]);
        // C still depends on A, which now sits at order 2
        assert_eq!(moved[1].prerequisites, vec![2]);
    }

    #[test]
    fn test_remove_and_compact() {
        let mut tasks = letters(&["A", "B", "C", "D"]);
        tasks[3].prerequisites = vec![1, 2, 8];
        let remaining = remove_and_compact(&tasks, 11);

        assert_eq!(titles(&remaining), ["A", "C", "D"]);
        assert!(is_contiguous(&remaining));
        assert_eq!(remaining[2].prerequisites, vec![1, 8]);
        assert_eq!(remove_and_compact(&tasks, 999), tasks);
    }

    #[test]
    fn test_order_mapping() {
        let tasks = letters(&["A", "B", "C"]);
        let plan = plan_move(&tasks, 0, Some(2)).expect("valid move");
        let mapping = order_mapping(&tasks, &plan.orders);
        assert!(mapping.contains(&(0, 2)));
        assert!(mapping.contains(&(1, 0)));
        assert!(mapping.contains(&(2, 1)));
    }
}
