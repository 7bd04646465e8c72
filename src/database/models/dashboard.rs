use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Derived aggregate view, recomputed on every dashboard request. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub total_employees: i64,
    pub total_departments: i64,
    pub total_salary_expense: f64,
    /// Department name -> employee count; only departments with at least one
    /// employee appear.
    pub department_headcounts: HashMap<String, i64>,
}
