use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Employee, EmployeeInput, EmployeeWithDepartment};

const EMPLOYEE_COLUMNS: &str = "id, full_name, department_id, email, salary, \
     date_of_joining, profile_picture, row_version, created_at, updated_at";

const EMPLOYEE_WITH_DEPARTMENT: &str = r#"
    SELECT e.id, e.full_name, e.department_id, d.name AS department_name,
           d.code AS department_code, e.email, e.salary, e.date_of_joining,
           e.profile_picture, e.row_version
    FROM employees e
    INNER JOIN departments d ON d.id = e.department_id
"#;

/// Outcome of an optimistic-concurrency update attempt.
#[derive(Debug)]
pub enum EmployeeUpdateOutcome {
    Updated(Employee),
    /// The row exists but was modified since the caller's snapshot was read.
    Conflict,
    /// The row no longer exists; the update completed as a no-op.
    Missing,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All employees with their department resolved, optionally filtered to
    /// those whose full name contains `search` as a substring. Matching case
    /// rules are the store's (SQLite LIKE).
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<EmployeeWithDepartment>> {
        let employees = match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                let sql = format!(
                    "{} WHERE e.full_name LIKE '%' || ?1 || '%'",
                    EMPLOYEE_WITH_DEPARTMENT
                );
                sqlx::query_as::<_, EmployeeWithDepartment>(&sql)
                    .bind(term)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, EmployeeWithDepartment>(EMPLOYEE_WITH_DEPARTMENT)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(employees)
    }

    pub async fn find_with_department(&self, id: i64) -> Result<Option<EmployeeWithDepartment>> {
        let sql = format!("{} WHERE e.id = ?1", EMPLOYEE_WITH_DEPARTMENT);
        let employee = sqlx::query_as::<_, EmployeeWithDepartment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let sql = format!("SELECT {} FROM employees WHERE id = ?1", EMPLOYEE_COLUMNS);
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Inserts a new employee and assigns its identity. `profile_picture` is
    /// the stored file name returned by a prior successful upload, if any.
    pub async fn create(
        &self,
        input: &EmployeeInput,
        profile_picture: Option<String>,
    ) -> Result<Employee> {
        let now = Utc::now().naive_utc();
        let sql = format!(
            r#"
            INSERT INTO employees
                (full_name, department_id, email, salary, date_of_joining,
                 profile_picture, row_version, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, ?8)
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        );
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(&input.full_name)
            .bind(input.department_id)
            .bind(&input.email)
            .bind(input.salary)
            .bind(input.date_of_joining)
            .bind(&profile_picture)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Updates the row only if `expected_version` still matches. A stale
    /// snapshot yields `Conflict`; a vanished row yields `Missing` without
    /// erroring. The image path is not part of edit.
    pub async fn update(
        &self,
        id: i64,
        input: &EmployeeInput,
        expected_version: i64,
    ) -> Result<EmployeeUpdateOutcome> {
        let now = Utc::now().naive_utc();
        let sql = format!(
            r#"
            UPDATE employees
            SET full_name = ?1, department_id = ?2, email = ?3, salary = ?4,
                date_of_joining = ?5, row_version = row_version + 1, updated_at = ?6
            WHERE id = ?7 AND row_version = ?8
            RETURNING {}
            "#,
            EMPLOYEE_COLUMNS
        );
        let updated = sqlx::query_as::<_, Employee>(&sql)
            .bind(&input.full_name)
            .bind(input.department_id)
            .bind(&input.email)
            .bind(input.salary)
            .bind(input.date_of_joining)
            .bind(now)
            .bind(id)
            .bind(expected_version)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(employee) => Ok(EmployeeUpdateOutcome::Updated(employee)),
            None => {
                if self.exists(id).await? {
                    Ok(EmployeeUpdateOutcome::Conflict)
                } else {
                    Ok(EmployeeUpdateOutcome::Missing)
                }
            }
        }
    }

    /// Deleting an absent id is a no-op, not an error.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
