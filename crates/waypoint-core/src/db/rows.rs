//! Conversions between SQLite rows and models.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use rusqlite::{types::Type, Row};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::Result,
    models::{Difficulty, Plan, PlanStatus, Resource, ResourceType, Task, TaskStatus},
};

pub(crate) const TASK_COLUMNS: &str = "id, plan_id, title, description, status, task_order, due_date, estimated_time_hours, estimated_cost_usd, difficulty, tools_needed, prerequisites, tags, created_at, updated_at";
pub(crate) const PLAN_COLUMNS: &str =
    "id, user_id, title, description, status, created_at, updated_at";
pub(crate) const RESOURCE_COLUMNS: &str = "id, plan_id, title, url, resource_type, created_at";

fn conversion_error(
    index: usize,
    error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, error.into())
}

fn parse_column<T>(row: &Row, index: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>().map_err(|e| conversion_error(index, e))
}

fn json_column<T: DeserializeOwned + Default>(row: &Row, index: usize) -> rusqlite::Result<T> {
    let raw: Option<String> = row.get(index)?;
    match raw {
        Some(text) if !text.is_empty() => {
            serde_json::from_str(&text).map_err(|e| conversion_error(index, e))
        }
        _ => Ok(T::default()),
    }
}

/// Encodes a list column as a JSON array.
pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn build_task(row: &Row) -> rusqlite::Result<Task> {
    let due_date: Option<String> = row.get(6)?;
    let due_date = due_date
        .map(|raw| raw.parse::<Date>().map_err(|e| conversion_error(6, e)))
        .transpose()?;

    let difficulty: Option<u8> = row.get(9)?;
    let difficulty = difficulty
        .map(|raw| Difficulty::new(raw).map_err(|e| conversion_error(9, e)))
        .transpose()?;

    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        title: row.get(2)?,
        description: row.get(3)?,
        status: parse_column::<TaskStatus>(row, 4)?,
        order: row.get::<_, i64>(5)? as u32,
        due_date,
        estimated_time_hours: row.get(7)?,
        estimated_cost_usd: row.get(8)?,
        difficulty,
        tools_needed: json_column(row, 10)?,
        prerequisites: json_column(row, 11)?,
        tags: json_column(row, 12)?,
        created_at: parse_column::<Timestamp>(row, 13)?,
        updated_at: parse_column::<Timestamp>(row, 14)?,
    })
}

pub(crate) fn build_plan(row: &Row) -> rusqlite::Result<Plan> {
    Ok(Plan {
        id: row.get::<_, i64>(0)? as u64,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: parse_column::<PlanStatus>(row, 4)?,
        created_at: parse_column::<Timestamp>(row, 5)?,
        updated_at: parse_column::<Timestamp>(row, 6)?,
        tasks: Vec::new(),
        resources: Vec::new(),
    })
}

pub(crate) fn build_resource(row: &Row) -> rusqlite::Result<Resource> {
    Ok(Resource {
        id: row.get::<_, i64>(0)? as u64,
        plan_id: row.get::<_, i64>(1)? as u64,
        title: row.get(2)?,
        url: row.get(3)?,
        resource_type: parse_column::<ResourceType>(row, 4)?,
        created_at: parse_column::<Timestamp>(row, 5)?,
    })
}
