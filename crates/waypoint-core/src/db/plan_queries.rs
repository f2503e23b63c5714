//! Plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::rows::{build_plan, build_resource, PLAN_COLUMNS, RESOURCE_COLUMNS};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanFilter, PlanStats, PlanStatus, Resource, ResourceType},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (user_id, title, description, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const UPDATE_PLAN_STATUS_SQL: &str = "UPDATE plans SET status = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const COUNT_PLANS_BY_STATUS_SQL: &str =
    "SELECT status, COUNT(*) FROM plans WHERE (?1 IS NULL OR user_id = ?1) GROUP BY status";
const INSERT_RESOURCE_SQL: &str = "INSERT INTO resources (plan_id, title, url, resource_type, created_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Creates a new plan owned by `user_id`.
    pub fn create_plan(
        &mut self,
        user_id: &str,
        title: &str,
        description: Option<&str>,
        status: PlanStatus,
    ) -> Result<Plan> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_PLAN_SQL,
                params![user_id, title, description, status.as_str(), &now_str, &now_str],
            )
            .db_context("Failed to insert plan")?;

        Ok(Plan {
            id: self.connection.last_insert_rowid() as u64,
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: description.map(String::from),
            status,
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
            resources: Vec::new(),
        })
    }

    /// Retrieves a plan by its ID together with its tasks and resources.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1");
        let plan = self
            .connection
            .query_row(&sql, params![id as i64], build_plan)
            .optional()
            .db_context("Failed to query plan")?;

        match plan {
            Some(plan) => Ok(Some(self.with_children(plan)?)),
            None => Ok(None),
        }
    }

    /// Lists plans matching the filter, most recently updated first.
    ///
    /// Without an explicit status, archived plans are hidden unless
    /// `include_archived` is set.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<Plan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM plans");
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref user_id) = filter.user_id {
            conditions.push("user_id = ?");
            values.push(Box::new(user_id.clone()));
        }
        if let Some(ref title) = filter.title_contains {
            conditions.push("title LIKE ?");
            values.push(Box::new(format!("%{title}%")));
        }
        match filter.status {
            Some(status) => {
                conditions.push("status = ?");
                values.push(Box::new(status.as_str()));
            }
            None if !filter.include_archived => {
                conditions.push("status != 'archived'");
            }
            None => {}
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let plans = stmt
            .query_map(rusqlite::params_from_iter(values.iter()), build_plan)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        plans
            .into_iter()
            .map(|plan| self.with_children(plan))
            .collect()
    }

    /// Sets a plan's status. Returns `None` when the plan does not exist.
    pub fn update_plan_status(&mut self, id: u64, status: PlanStatus) -> Result<Option<Plan>> {
        let now_str = Timestamp::now().to_string();
        let changed = self
            .connection
            .execute(
                UPDATE_PLAN_STATUS_SQL,
                params![status.as_str(), &now_str, id as i64],
            )
            .db_context("Failed to update plan status")?;

        if changed == 0 {
            return Ok(None);
        }
        self.get_plan(id)
    }

    /// Deletes a plan; its tasks and resources go with it.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        if deleted == 0 {
            return Err(PlannerError::PlanNotFound { id });
        }
        Ok(())
    }

    /// Counts plans by status, optionally for a single owner.
    pub fn plan_stats(&self, user_id: Option<&str>) -> Result<PlanStats> {
        let mut stmt = self
            .connection
            .prepare(COUNT_PLANS_BY_STATUS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })
            .db_context("Failed to count plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plan counts")?;

        let mut stats = PlanStats::default();
        for (status, count) in rows {
            let count = count as u32;
            stats.total += count;
            match status.parse::<PlanStatus>() {
                Ok(PlanStatus::Draft) => stats.draft = count,
                Ok(PlanStatus::Active) => stats.active = count,
                Ok(PlanStatus::Completed) => stats.completed = count,
                Ok(PlanStatus::Archived) => stats.archived = count,
                Err(_) => {}
            }
        }
        Ok(stats)
    }

    /// Attaches a reference link to a plan.
    pub fn add_resource(
        &mut self,
        plan_id: u64,
        title: &str,
        url: &str,
        resource_type: ResourceType,
    ) -> Result<Resource> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        ensure_plan_exists(&tx, plan_id)?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_RESOURCE_SQL,
            params![plan_id as i64, title, url, resource_type.as_str(), &now_str],
        )
        .db_context("Failed to insert resource")?;
        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
            .db_context("Failed to update plan timestamp")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Resource {
            id,
            plan_id,
            title: title.to_string(),
            url: url.to_string(),
            resource_type,
            created_at: now,
        })
    }

    /// Retrieves the resources of a plan in insertion order.
    pub fn get_resources(&self, plan_id: u64) -> Result<Vec<Resource>> {
        let sql = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE plan_id = ?1 ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let resources = stmt
            .query_map(params![plan_id as i64], build_resource)
            .db_context("Failed to query resources")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch resources")?;
        Ok(resources)
    }

    fn with_children(&self, mut plan: Plan) -> Result<Plan> {
        plan.tasks = self.get_tasks(plan.id)?;
        plan.resources = self.get_resources(plan.id)?;
        Ok(plan)
    }
}

/// Fails with `PlanNotFound` unless the plan exists.
pub(crate) fn ensure_plan_exists(conn: &Connection, plan_id: u64) -> Result<()> {
    let exists: bool = conn
        .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| row.get(0))
        .db_context("Failed to check plan existence")?;

    if exists {
        Ok(())
    } else {
        Err(PlannerError::PlanNotFound { id: plan_id })
    }
}
