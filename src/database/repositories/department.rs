use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Department, DepartmentInput};

/// Outcome of a department delete attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum DepartmentDeleteOutcome {
    Deleted,
    /// Absent id; treated as a completed deletion by callers.
    Missing,
    /// Employees still reference the department; the delete is rejected.
    Referenced(i64),
}

#[derive(Clone)]
pub struct DepartmentRepository {
    pool: SqlitePool,
}

impl DepartmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: DepartmentInput) -> Result<Department> {
        let now = Utc::now().naive_utc();
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, code, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, code, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.code)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Department>> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, code, created_at, updated_at FROM departments WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn get_all(&self) -> Result<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name, code, created_at, updated_at FROM departments ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    pub async fn update(&self, id: i64, input: DepartmentInput) -> Result<Option<Department>> {
        let now = Utc::now().naive_utc();
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = ?1, code = ?2, updated_at = ?3
            WHERE id = ?4
            RETURNING id, name, code, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.code)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(department)
    }

    /// Deletes a department unless employees still reference it.
    pub async fn delete(&self, id: i64) -> Result<DepartmentDeleteOutcome> {
        let referencing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id = ?1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if referencing > 0 {
            return Ok(DepartmentDeleteOutcome::Referenced(referencing));
        }

        let result = sqlx::query("DELETE FROM departments WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(DepartmentDeleteOutcome::Deleted)
        } else {
            Ok(DepartmentDeleteOutcome::Missing)
        }
    }
}
