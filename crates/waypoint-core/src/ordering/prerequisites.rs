//! Prerequisite resolution.
//!
//! Prerequisites name sibling tasks by their `order` value. References that
//! match no task are treated as absent everywhere in this module.

use std::collections::{HashMap, HashSet};

use petgraph::{algo::tarjan_scc, graphmap::DiGraphMap};

use crate::{
    error::{PlannerError, Result},
    models::Task,
};

/// Orders tasks so each one follows the tasks it depends on.
///
/// Depth-first over the input in order: before a task is emitted, every task
/// whose `order` appears in its prerequisites is visited, in input order. A
/// task that is already on the traversal path is not re-entered, which is
/// what breaks cycles. The output is always a permutation of the input.
///
/// ```rust
/// use waypoint_core::{models::Task, ordering::sort_by_prerequisites};
///
/// let tasks = vec![
///     Task::new(3, 1, "Paint", 2).with_prerequisites(vec![0]),
///     Task::new(2, 1, "Buy paint", 1),
///     Task::new(1, 1, "Sand walls", 0),
/// ];
/// let sorted = sort_by_prerequisites(&tasks);
/// let ids: Vec<u64> = sorted.iter().map(|t| t.id).collect();
/// assert_eq!(ids, [1, 3, 2]);
/// ```
pub fn sort_by_prerequisites(tasks: &[Task]) -> Vec<Task> {
    sorted_indices(tasks)
        .into_iter()
        .map(|index| tasks[index].clone())
        .collect()
}

fn sorted_indices(tasks: &[Task]) -> Vec<usize> {
    let mut entered = vec![false; tasks.len()];
    let mut output = Vec::with_capacity(tasks.len());
    // (task index, prerequisite indices, next prerequisite to visit)
    let mut stack: Vec<(usize, Vec<usize>, usize)> = Vec::new();

    for root in 0..tasks.len() {
        if entered[root] {
            continue;
        }
        entered[root] = true;
        stack.push((root, prerequisite_indices(tasks, &tasks[root]), 0));

        while let Some((index, prerequisites, next)) = stack.last_mut() {
            if let Some(&candidate) = prerequisites.get(*next) {
                *next += 1;
                if !entered[candidate] {
                    entered[candidate] = true;
                    let nested = prerequisite_indices(tasks, &tasks[candidate]);
                    stack.push((candidate, nested, 0));
                }
            } else {
                output.push(*index);
                stack.pop();
            }
        }
    }

    output
}

fn prerequisite_indices(tasks: &[Task], task: &Task) -> Vec<usize> {
    if task.prerequisites.is_empty() {
        return Vec::new();
    }
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| task.prerequisites.contains(&t.order))
        .map(|(i, _)| i)
        .collect()
}

/// Tasks referenced by `task.prerequisites`, in list order. Dangling
/// references are skipped.
pub fn prerequisite_tasks<'a>(task: &Task, all: &'a [Task]) -> Vec<&'a Task> {
    all.iter()
        .filter(|t| task.prerequisites.contains(&t.order))
        .collect()
}

/// Whether the task declares any prerequisites at all.
pub fn has_prerequisites(task: &Task) -> bool {
    !task.prerequisites.is_empty()
}

/// True iff every existing prerequisite task is completed.
///
/// Vacuously true for a task without prerequisites. A reference to an order
/// that no task holds does not block readiness.
pub fn prerequisites_satisfied(task: &Task, all: &[Task]) -> bool {
    prerequisite_tasks(task, all)
        .iter()
        .all(|t| t.status.is_completed())
}

/// Groups of orders whose prerequisites form a cycle.
///
/// Each group is sorted ascending, and groups are sorted by their first
/// order. A task listing its own order forms a group of one.
pub fn find_prerequisite_cycles(tasks: &[Task]) -> Vec<Vec<u32>> {
    let mut graph = DiGraphMap::<u32, ()>::new();
    let existing: HashSet<u32> = tasks.iter().map(|t| t.order).collect();

    for task in tasks {
        graph.add_node(task.order);
        for prerequisite in &task.prerequisites {
            if existing.contains(prerequisite) {
                graph.add_edge(*prerequisite, task.order, ());
            }
        }
    }

    let mut cycles: Vec<Vec<u32>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || graph.contains_edge(component[0], component[0])
        })
        .map(|mut component| {
            component.sort_unstable();
            component
        })
        .collect();
    cycles.sort();
    cycles
}

/// Like [`sort_by_prerequisites`] but refuses cyclic input.
///
/// # Errors
///
/// Returns [`PlannerError::PrerequisiteCycle`] naming the first cycle found.
pub fn sort_by_prerequisites_strict(tasks: &[Task]) -> Result<Vec<Task>> {
    if let Some(cycle) = find_prerequisite_cycles(tasks).into_iter().next() {
        return Err(PlannerError::PrerequisiteCycle { orders: cycle });
    }
    Ok(sort_by_prerequisites(tasks))
}

/// Keeps only the references that name one of `known` orders.
///
/// Applied whenever prerequisites are written so a reference to a missing
/// order cannot start pointing at a task that later lands on it.
pub fn retain_known(prerequisites: &[u32], known: &HashSet<u32>) -> Vec<u32> {
    prerequisites
        .iter()
        .copied()
        .filter(|order| known.contains(order))
        .collect()
}

/// Rewrites prerequisite references after orders changed.
///
/// `mapping` sends an old order to its new order, or to `None` when the task
/// holding it was removed. References to removed tasks are dropped; orders
/// missing from the mapping are left untouched, so dangling references stay
/// dangling.
pub fn remap_prerequisites(tasks: &mut [Task], mapping: &HashMap<u32, Option<u32>>) {
    for task in tasks.iter_mut() {
        task.prerequisites = remapped(&task.prerequisites, mapping);
    }
}

/// Remaps a single prerequisite list. See [`remap_prerequisites`].
pub fn remapped(prerequisites: &[u32], mapping: &HashMap<u32, Option<u32>>) -> Vec<u32> {
    prerequisites
        .iter()
        .filter_map(|order| match mapping.get(order) {
            Some(new_order) => *new_order,
            None => Some(*order),
        })
        .collect()
}
