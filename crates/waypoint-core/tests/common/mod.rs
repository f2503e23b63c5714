#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use tempfile::TempDir;
use waypoint_core::{
    params::{CreatePlan, CreateTask},
    sync::Mutation,
    Planner, PlannerBuilder, PlannerError, Result, Task, TaskOrder, TaskPatch, TaskStore,
};

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Creates a plan holding one pending task per title, in order.
pub async fn create_plan_with_tasks(planner: &Planner, titles: &[&str]) -> u64 {
    let plan = planner
        .create_plan(&CreatePlan {
            title: "Test Plan".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create plan");
    for title in titles {
        planner
            .add_task(&CreateTask {
                plan_id: plan.id,
                title: title.to_string(),
                ..Default::default()
            })
            .await
            .expect("Failed to add task");
    }
    plan.id
}

pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|t| t.title.clone()).collect()
}

/// Builds plan 1 with one task per title; IDs start at 10.
pub fn sample_tasks(titles: &[&str]) -> Vec<Task> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Task::new(10 + i as u64, 1, *title, i as u32))
        .collect()
}

/// In-memory store that can be told to reject requests.
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    fail_writes: AtomicBool,
    fail_fetches: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            fail_writes: AtomicBool::new(false),
            fail_fetches: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Number of write requests received, failed ones included.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn write(&self, mutation: Mutation) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PlannerError::store("connection reset"));
        }
        let mut tasks = self.tasks.lock().unwrap();
        *tasks = mutation.apply(&tasks);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn fetch_tasks(&self, plan_id: u64) -> Result<Vec<Task>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(PlannerError::store("connection reset"));
        }
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|t| t.plan_id == plan_id)
            .collect())
    }

    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task> {
        if !self.snapshot().iter().any(|t| t.id == task_id) {
            return Err(PlannerError::TaskNotFound { id: task_id });
        }
        self.write(Mutation::Update {
            task_id,
            patch: patch.clone(),
        })?;
        self.snapshot()
            .into_iter()
            .find(|t| t.id == task_id)
            .ok_or(PlannerError::TaskNotFound { id: task_id })
    }

    async fn reorder_tasks(&self, orders: &[TaskOrder]) -> Result<()> {
        self.write(Mutation::Reorder {
            orders: orders.to_vec(),
        })
    }

    async fn delete_task(&self, task_id: u64) -> Result<()> {
        self.write(Mutation::Delete { task_id })
    }
}
