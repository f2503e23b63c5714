use std::collections::HashSet;

use proptest::prelude::*;
use waypoint_core::{
    models::Task,
    ordering::{
        apply_orders, find_prerequisite_cycles, is_contiguous, plan_move, sort_by_prerequisites,
        sort_by_prerequisites_strict,
    },
};

fn numbered(len: usize) -> Vec<Task> {
    (0..len)
        .map(|i| Task::new(i as u64 + 100, 1, format!("Task {i}"), i as u32))
        .collect()
}

fn with_prerequisites(len: usize, edges: &[(usize, usize)]) -> Vec<Task> {
    let mut tasks = numbered(len);
    for &(from, to) in edges {
        if from < len && to < len {
            tasks[to].prerequisites.push(from as u32);
        }
    }
    tasks
}

proptest! {
    #[test]
    fn prop_move_matches_splice(len in 0..12usize, source in 0..14usize, destination in 0..14usize) {
        let tasks = numbered(len);
        match plan_move(&tasks, source, Some(destination)) {
            Some(plan) => {
                let mut expected: Vec<u64> = tasks.iter().map(|t| t.id).collect();
                let moved = expected.remove(source);
                expected.insert(destination, moved);

                let actual: Vec<u64> = plan.tasks.iter().map(|t| t.id).collect();
                prop_assert_eq!(actual, expected);
                prop_assert!(is_contiguous(&plan.tasks));
                prop_assert_eq!(plan.orders.len(), len);
                prop_assert_eq!(apply_orders(&tasks, &plan.orders), plan.tasks);
            }
            None => {
                prop_assert!(len < 2 || source == destination || source >= len || destination >= len);
            }
        }
    }

    #[test]
    fn prop_sort_is_permutation(
        len in 0..15usize,
        edges in proptest::collection::vec((0..15usize, 0..15usize), 0..40),
        dangling in proptest::collection::vec(15..30u32, 0..5),
    ) {
        let mut tasks = with_prerequisites(len, &edges);
        if let Some(first) = tasks.first_mut() {
            first.prerequisites.extend(dangling);
        }

        let sorted = sort_by_prerequisites(&tasks);
        let mut before: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        let mut after: Vec<u64> = sorted.iter().map(|t| t.id).collect();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_acyclic_sort_respects_prerequisites(
        len in 1..15usize,
        edges in proptest::collection::vec((0..15usize, 0..15usize), 0..40),
    ) {
        // Only point at lower orders so the graph stays acyclic.
        let forward: Vec<(usize, usize)> = edges
            .into_iter()
            .filter(|(from, to)| from < to)
            .collect();
        let mut tasks = with_prerequisites(len, &forward);
        tasks.reverse();

        prop_assert!(find_prerequisite_cycles(&tasks).is_empty());
        let sorted = sort_by_prerequisites_strict(&tasks).unwrap();

        let mut seen = HashSet::new();
        for task in &sorted {
            for prerequisite in &task.prerequisites {
                prop_assert!(seen.contains(prerequisite));
            }
            seen.insert(task.order);
        }
    }
}

#[test]
fn test_cycle_is_reported_by_strict_sort() {
    let tasks = with_prerequisites(3, &[(0, 1), (1, 2), (2, 0)]);
    assert_eq!(find_prerequisite_cycles(&tasks), vec![vec![0, 1, 2]]);
    assert!(sort_by_prerequisites_strict(&tasks).is_err());
    assert_eq!(sort_by_prerequisites(&tasks).len(), 3);
}
