use anyhow::Result;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

use crate::database::models::DashboardSnapshot;

#[derive(Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Computes all four aggregates from one consistent read. Either the whole
    /// snapshot is produced or the operation fails.
    pub async fn summarize(&self) -> Result<DashboardSnapshot> {
        let mut tx = self.pool.begin().await?;

        let total_employees: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&mut *tx)
            .await?;

        let total_departments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM departments")
            .fetch_one(&mut *tx)
            .await?;

        let total_salary_expense: f64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(salary), 0.0) FROM employees")
                .fetch_one(&mut *tx)
                .await?;

        let rows = sqlx::query(
            r#"
            SELECT d.name AS department_name, COUNT(*) AS headcount
            FROM employees e
            INNER JOIN departments d ON d.id = e.department_id
            GROUP BY d.name
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut department_headcounts = HashMap::new();
        for row in rows {
            let name: String = row.try_get("department_name")?;
            let count: i64 = row.try_get("headcount")?;
            department_headcounts.insert(name, count);
        }

        Ok(DashboardSnapshot {
            total_employees,
            total_departments,
            total_salary_expense,
            department_headcounts,
        })
    }
}
