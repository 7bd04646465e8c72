use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const SALARY_MIN: f64 = 0.0;
pub const SALARY_MAX: f64 = 1_000_000.0;

// Same shape the usual email annotations check: something@domain.tld
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub department_id: i64,
    pub email: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub profile_picture: Option<String>,
    pub row_version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Employee row with its department resolved, as returned by list/detail reads.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeWithDepartment {
    pub id: i64,
    pub full_name: String,
    pub department_id: i64,
    pub department_name: String,
    pub department_code: Option<String>,
    pub email: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub profile_picture: Option<String>,
    pub row_version: i64,
}

/// Validated employee fields ready for insert or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub full_name: String,
    pub department_id: i64,
    pub email: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
}

/// A single field-level validation failure, keyed by the wire field name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl EmployeeInput {
    /// Field-level checks that do not need the store. Department existence is
    /// checked separately against the database.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.full_name.trim().is_empty() {
            issues.push(ValidationIssue::new("fullName", "Full name is required"));
        }

        if !EMAIL_RE.is_match(&self.email) {
            issues.push(ValidationIssue::new(
                "email",
                "Email must be a valid email address",
            ));
        }

        if !(SALARY_MIN..=SALARY_MAX).contains(&self.salary) {
            issues.push(ValidationIssue::new(
                "salary",
                format!("Salary must be between {} and {}", SALARY_MIN, SALARY_MAX),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmployeeInput {
        EmployeeInput {
            full_name: "Jane Doe".to_string(),
            department_id: 1,
            email: "jane@example.com".to_string(),
            salary: 50_000.0,
            date_of_joining: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut i = input();
        i.full_name = "   ".to_string();
        let issues = i.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "fullName");
    }

    #[test]
    fn email_without_domain_is_rejected() {
        let mut i = input();
        i.email = "jane@nowhere".to_string();
        assert!(i.validate().iter().any(|v| v.field == "email"));

        i.email = "jane.example.com".to_string();
        assert!(i.validate().iter().any(|v| v.field == "email"));
    }

    #[test]
    fn salary_bounds_are_inclusive() {
        let mut i = input();
        i.salary = 0.0;
        assert!(i.validate().is_empty());

        i.salary = 1_000_000.0;
        assert!(i.validate().is_empty());

        i.salary = 1_000_000.01;
        assert!(i.validate().iter().any(|v| v.field == "salary"));

        i.salary = -1.0;
        assert!(i.validate().iter().any(|v| v.field == "salary"));
    }
}
