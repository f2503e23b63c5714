//! Task CRUD operations and queries.
//!
//! Order changes (insert at a position, reorder, delete) rewrite the whole
//! plan's layout inside one transaction: orders stay unique and contiguous,
//! and prerequisite references are remapped so they keep pointing at the
//! same tasks.

use std::collections::{HashMap, HashSet};

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{
    plan_queries::ensure_plan_exists,
    rows::{build_task, to_json, TASK_COLUMNS},
};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{NewTask, Task, TaskIntelligence, TaskPatch, TaskStatus},
    ordering::{
        apply_orders_remapped, is_contiguous, plan_move_to, remap_prerequisites,
        remove_and_compact, retain_known, TaskOrder,
    },
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (plan_id, title, description, status, task_order, due_date, estimated_time_hours, estimated_cost_usd, difficulty, tools_needed, prerequisites, tags, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const UPDATE_TASK_FIELDS_SQL: &str = "UPDATE tasks SET title = ?1, description = ?2, status = ?3, due_date = ?4, updated_at = ?5 WHERE id = ?6";
const UPDATE_TASK_INTELLIGENCE_SQL: &str = "UPDATE tasks SET estimated_time_hours = ?1, estimated_cost_usd = ?2, difficulty = ?3, tools_needed = ?4, prerequisites = ?5, tags = ?6, updated_at = ?7 WHERE id = ?8";
const PARK_PLAN_ORDERS_SQL: &str =
    "UPDATE tasks SET task_order = -1 - task_order WHERE plan_id = ?1";
const UPDATE_TASK_LAYOUT_SQL: &str =
    "UPDATE tasks SET task_order = ?1, prerequisites = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_TASK_ORDER_ONLY_SQL: &str = "UPDATE tasks SET task_order = ?1 WHERE id = ?2";
const SELECT_TASK_PLAN_SQL: &str = "SELECT plan_id FROM tasks WHERE id = ?1";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Retrieves all tasks of a plan ordered by position.
    pub fn get_tasks(&self, plan_id: u64) -> Result<Vec<Task>> {
        select_tasks(&self.connection, plan_id)
    }

    /// Like [`get_tasks`](Self::get_tasks) but fails with
    /// `PlanNotFound` for an unknown plan instead of returning nothing.
    pub fn fetch_plan_tasks(&self, plan_id: u64) -> Result<Vec<Task>> {
        ensure_plan_exists(&self.connection, plan_id)?;
        select_tasks(&self.connection, plan_id)
    }

    /// Retrieves a single task by its ID.
    pub fn get_task(&self, task_id: u64) -> Result<Option<Task>> {
        select_task(&self.connection, task_id)
    }

    /// Adds a task to a plan, either appended or inserted at a position.
    ///
    /// Inserting shifts later tasks down by one and remaps prerequisite
    /// references to them. The new task's prerequisites refer to the layout
    /// after the insert; references to orders no task holds are dropped.
    pub fn add_task(&mut self, plan_id: u64, new: &NewTask) -> Result<Task> {
        new.intelligence.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        ensure_plan_exists(&tx, plan_id)?;

        let existing = select_tasks(&tx, plan_id)?;
        let count = existing.len() as u32;
        let position = new.position.unwrap_or(count);
        if position > count {
            return Err(PlannerError::invalid_input("position").with_reason(format!(
                "Position {position} is out of range. Plan has {count} tasks"
            )));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        if position < count {
            let live: HashSet<u32> = existing.iter().map(|t| t.order).collect();
            let mapping: HashMap<u32, Option<u32>> = existing
                .iter()
                .filter(|t| t.order >= position)
                .map(|t| (t.order, Some(t.order + 1)))
                .collect();
            let mut shifted = existing.clone();
            for task in shifted.iter_mut() {
                task.prerequisites = retain_known(&task.prerequisites, &live);
                if task.order >= position {
                    task.order += 1;
                }
            }
            remap_prerequisites(&mut shifted, &mapping);
            write_layout(&tx, plan_id, &existing, &shifted, &now_str)?;
        }

        let layout: HashSet<u32> = (0..=count).collect();
        let mut intelligence = new.intelligence.clone();
        intelligence.prerequisites = retain_known(&intelligence.prerequisites, &layout);
        let intelligence = &intelligence;
        tx.execute(
            INSERT_TASK_SQL,
            params![
                plan_id as i64,
                &new.title,
                &new.description,
                TaskStatus::Pending.as_str(),
                position as i64,
                new.due_date.map(|d| d.to_string()),
                intelligence.estimated_time_hours,
                intelligence.estimated_cost_usd,
                intelligence.difficulty.map(|d| d.value()),
                to_json(&intelligence.tools_needed)?,
                to_json(&intelligence.prerequisites)?,
                to_json(&intelligence.tags)?,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert task")?;
        let id = tx.last_insert_rowid() as u64;

        touch_plan(&tx, plan_id, &now_str)?;
        tx.commit().db_context("Failed to commit transaction")?;

        let mut task = Task::new(id, plan_id, new.title.clone(), position);
        task.description = new.description.clone();
        task.due_date = new.due_date;
        task.set_intelligence(intelligence.clone());
        task.created_at = now;
        task.updated_at = now;
        Ok(task)
    }

    /// Applies a partial update to a task and returns the stored result.
    ///
    /// A new `order` moves the task to that position (clamped to the end of
    /// the list) and shifts the tasks in between. An empty patch is a no-op.
    pub fn update_task(&mut self, task_id: u64, patch: &TaskPatch) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut task = select_task(&tx, task_id)?.ok_or(PlannerError::TaskNotFound { id: task_id })?;
        if patch.is_empty() {
            return Ok(task);
        }

        let now_str = Timestamp::now().to_string();

        if let Some(order) = patch.order {
            let before = select_tasks(&tx, task.plan_id)?;
            if let Some(plan) = plan_move_to(&before, task_id, order) {
                let after = apply_orders_remapped(&before, &plan.orders);
                write_layout(&tx, task.plan_id, &before, &after, &now_str)?;
            }
        }

        TaskPatch {
            order: None,
            ..patch.clone()
        }
        .apply_to(&mut task);

        tx.execute(
            UPDATE_TASK_FIELDS_SQL,
            params![
                &task.title,
                &task.description,
                task.status.as_str(),
                task.due_date.map(|d| d.to_string()),
                &now_str,
                task_id as i64
            ],
        )
        .db_context("Failed to update task")?;

        touch_plan(&tx, task.plan_id, &now_str)?;
        let updated = select_task(&tx, task_id)?.ok_or(PlannerError::TaskNotFound { id: task_id })?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Persists a reorder batch atomically.
    ///
    /// Every task must exist and belong to the same plan, and the resulting
    /// orders must be exactly `0..N` for the plan's N tasks. Tasks the batch
    /// does not name keep their order. On any error nothing is written.
    pub fn reorder_tasks(&mut self, orders: &[TaskOrder]) -> Result<()> {
        if orders.is_empty() {
            return Err(PlannerError::invalid_input("orders").with_reason("Reorder batch is empty"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let mut plan_ids = HashSet::new();
        for entry in orders {
            plan_ids.insert(select_task_plan(&tx, entry.task_id)?);
        }
        let plan_id = match plan_ids.into_iter().collect::<Vec<_>>().as_slice() {
            [plan_id] => *plan_id,
            _ => {
                return Err(PlannerError::invalid_input("orders")
                    .with_reason("All tasks in a reorder batch must belong to the same plan"));
            }
        };

        let before = select_tasks(&tx, plan_id)?;
        let after = apply_orders_remapped(&before, orders);

        let unique: HashSet<u32> = after.iter().map(|t| t.order).collect();
        if unique.len() != after.len() {
            return Err(PlannerError::invalid_input("orders")
                .with_reason("Reorder batch would give two tasks the same order"));
        }
        if !is_contiguous(&after) {
            return Err(PlannerError::invalid_input("orders").with_reason(format!(
                "Reorder batch must leave orders 0 to {} without gaps",
                after.len().saturating_sub(1)
            )));
        }

        let now_str = Timestamp::now().to_string();
        write_layout(&tx, plan_id, &before, &after, &now_str)?;
        touch_plan(&tx, plan_id, &now_str)?;
        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Reordered {} tasks in plan {plan_id}", orders.len());
        Ok(())
    }

    /// Deletes a task and compacts the orders of the tasks after it.
    pub fn delete_task(&mut self, task_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan_id = select_task_plan(&tx, task_id)?;
        let before = select_tasks(&tx, plan_id)?;

        tx.execute(DELETE_TASK_SQL, params![task_id as i64])
            .db_context("Failed to delete task")?;

        let after = remove_and_compact(&before, task_id);
        let remaining: Vec<Task> = before.into_iter().filter(|t| t.id != task_id).collect();
        let now_str = Timestamp::now().to_string();
        write_layout(&tx, plan_id, &remaining, &after, &now_str)?;

        touch_plan(&tx, plan_id, &now_str)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Replaces a task's regenerable metadata wholesale.
    ///
    /// Prerequisites naming an order that no task of the plan holds are
    /// dropped.
    pub fn set_task_intelligence(
        &mut self,
        task_id: u64,
        intelligence: &TaskIntelligence,
    ) -> Result<Task> {
        intelligence.validate()?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let plan_id = select_task_plan(&tx, task_id)?;
        let known: HashSet<u32> = select_tasks(&tx, plan_id)?
            .iter()
            .map(|t| t.order)
            .collect();
        let prerequisites = retain_known(&intelligence.prerequisites, &known);
        if prerequisites.len() != intelligence.prerequisites.len() {
            debug!(
                "Dropped prerequisites of task {task_id} that name no task in plan {plan_id}"
            );
        }

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_TASK_INTELLIGENCE_SQL,
            params![
                intelligence.estimated_time_hours,
                intelligence.estimated_cost_usd,
                intelligence.difficulty.map(|d| d.value()),
                to_json(&intelligence.tools_needed)?,
                to_json(&prerequisites)?,
                to_json(&intelligence.tags)?,
                &now_str,
                task_id as i64
            ],
        )
        .db_context("Failed to update task intelligence")?;

        touch_plan(&tx, plan_id, &now_str)?;
        let task = select_task(&tx, task_id)?.ok_or(PlannerError::TaskNotFound { id: task_id })?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(task)
    }
}

fn select_tasks(conn: &Connection, plan_id: u64) -> Result<Vec<Task>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE plan_id = ?1 ORDER BY task_order");
    let mut stmt = conn.prepare(&sql).db_context("Failed to prepare query")?;
    let tasks = stmt
        .query_map(params![plan_id as i64], build_task)
        .db_context("Failed to query tasks")?
        .collect::<std::result::Result<Vec<_>, _>>()
        .db_context("Failed to fetch tasks")?;
    Ok(tasks)
}

fn select_task(conn: &Connection, task_id: u64) -> Result<Option<Task>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
    conn.query_row(&sql, params![task_id as i64], build_task)
        .optional()
        .db_context("Failed to query task")
}

fn select_task_plan(conn: &Connection, task_id: u64) -> Result<u64> {
    conn.query_row(SELECT_TASK_PLAN_SQL, params![task_id as i64], |row| {
        row.get::<_, i64>(0)
    })
    .optional()
    .db_context("Failed to query task")?
    .map(|plan_id| plan_id as u64)
    .ok_or(PlannerError::TaskNotFound { id: task_id })
}

fn touch_plan(conn: &Connection, plan_id: u64, now_str: &str) -> Result<()> {
    conn.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![now_str, plan_id as i64])
        .db_context("Failed to update plan timestamp")?;
    Ok(())
}

/// Writes a new order and prerequisite layout for every task of a plan.
///
/// Orders are first parked at negative values so that the unique
/// `(plan_id, task_order)` constraint holds after every statement.
/// `after` must list every task currently stored for the plan.
fn write_layout(
    conn: &Connection,
    plan_id: u64,
    before: &[Task],
    after: &[Task],
    now_str: &str,
) -> Result<()> {
    conn.execute(PARK_PLAN_ORDERS_SQL, params![plan_id as i64])
        .db_context("Failed to park task orders")?;

    for task in after {
        let changed = before
            .iter()
            .find(|b| b.id == task.id)
            .map_or(true, |b| b.order != task.order || b.prerequisites != task.prerequisites);

        if changed {
            conn.execute(
                UPDATE_TASK_LAYOUT_SQL,
                params![
                    task.order as i64,
                    to_json(&task.prerequisites)?,
                    now_str,
                    task.id as i64
                ],
            )
            .db_context("Failed to update task order")?;
        } else {
            conn.execute(
                UPDATE_TASK_ORDER_ONLY_SQL,
                params![task.order as i64, task.id as i64],
            )
            .db_context("Failed to restore task order")?;
        }
    }

    Ok(())
}
