//! Explicit per-operation authorization gate.
//!
//! Every handler resolves its operation against the policy table below before
//! touching the data layer. Denials are distinct from not-found: a missing or
//! invalid credential yields 401, an insufficient role yields 403.

use crate::error::AppError;
use crate::services::auth::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListEmployees,
    EmployeeDetails,
    CreateEmployee,
    EditEmployee,
    DeleteEmployee,
    ListDepartments,
    DepartmentDetails,
    CreateDepartment,
    EditDepartment,
    DeleteDepartment,
    DashboardSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessLevel {
    Public,
    Authenticated,
    Admin,
}

/// The policy table: minimum access level per operation.
pub fn required_level(operation: Operation) -> AccessLevel {
    use Operation::*;

    match operation {
        ListEmployees | EmployeeDetails | ListDepartments | DepartmentDetails => {
            AccessLevel::Public
        }
        CreateEmployee | EditEmployee => AccessLevel::Authenticated,
        DeleteEmployee | DashboardSummary => AccessLevel::Admin,
        CreateDepartment | EditDepartment | DeleteDepartment => AccessLevel::Admin,
    }
}

fn caller_level(claims: Option<&Claims>) -> AccessLevel {
    match claims {
        None => AccessLevel::Public,
        Some(c) if c.is_admin() => AccessLevel::Admin,
        Some(_) => AccessLevel::Authenticated,
    }
}

/// Permits or denies the caller for one operation.
pub fn authorize(claims: Option<&Claims>, operation: Operation) -> Result<(), AppError> {
    let required = required_level(operation);
    let actual = caller_level(claims);

    if actual >= required {
        return Ok(());
    }

    match claims {
        None => Err(AppError::Unauthorized),
        Some(c) => {
            log::warn!(
                "User {} denied for {:?} (role {})",
                c.user_id(),
                operation,
                c.role
            );
            Err(AppError::PermissionDenied(format!(
                "Operation requires {:?} access",
                required
            )))
        }
    }
}
