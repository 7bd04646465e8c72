use actix_multipart::form::{MultipartForm, bytes::Bytes as UploadedBytes, text::Text};
use actix_web::{HttpResponse, Result, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::database::models::{
    Department, EmployeeInput, ValidationIssue,
};
use crate::database::repositories::{
    DepartmentRepository, EmployeeRepository, EmployeeUpdateOutcome,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::FileStorage;
use crate::services::access::{self, Operation};
use crate::services::auth::{Claims, MaybeClaims};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    pub search_string: Option<String>,
}

/// Multipart create form. All scalar fields arrive as text and are parsed in
/// the handler so a malformed value becomes a field error on the re-display
/// model instead of a bare 400.
#[derive(Debug, MultipartForm)]
pub struct CreateEmployeeForm {
    #[multipart(rename = "fullName")]
    pub full_name: Text<String>,
    #[multipart(rename = "departmentId")]
    pub department_id: Text<String>,
    pub email: Text<String>,
    pub salary: Text<String>,
    #[multipart(rename = "dateOfJoining")]
    pub date_of_joining: Text<String>,
    #[multipart(rename = "profileImage", limit = "5MB")]
    pub profile_image: Option<UploadedBytes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeInput {
    pub id: i64,
    pub full_name: String,
    pub department_id: i64,
    pub email: String,
    pub salary: f64,
    pub date_of_joining: NaiveDate,
    pub row_version: i64,
}

/// The entered values echoed back on a validation failure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub full_name: String,
    pub department_id: String,
    pub email: String,
    pub salary: String,
    pub date_of_joining: String,
}

/// Re-display model for a failed create/edit: the values as entered, a fresh
/// department list for the selection control, and the field errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeFormState {
    pub values: EmployeeDraft,
    pub departments: Vec<Department>,
    pub errors: Vec<ValidationIssue>,
}

pub async fn list_employees(
    MaybeClaims(claims): MaybeClaims,
    repo: web::Data<EmployeeRepository>,
    query: web::Query<EmployeeListQuery>,
) -> Result<HttpResponse> {
    access::authorize(claims.as_ref(), Operation::ListEmployees)?;

    let employees = repo
        .list(query.search_string.as_deref())
        .await
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employees)))
}

pub async fn get_employee(
    MaybeClaims(claims): MaybeClaims,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    access::authorize(claims.as_ref(), Operation::EmployeeDetails)?;

    let id = path.into_inner();
    let employee = repo
        .find_with_department(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

pub async fn create_employee(
    claims: Claims,
    employee_repo: web::Data<EmployeeRepository>,
    department_repo: web::Data<DepartmentRepository>,
    storage: web::Data<FileStorage>,
    MultipartForm(form): MultipartForm<CreateEmployeeForm>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::CreateEmployee)?;

    let draft = EmployeeDraft {
        full_name: form.full_name.0,
        department_id: form.department_id.0,
        email: form.email.0,
        salary: form.salary.0,
        date_of_joining: form.date_of_joining.0,
    };

    let mut errors = Vec::new();

    let department_id = match draft.department_id.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(ValidationIssue::new("departmentId", "Department is required"));
            None
        }
    };
    let salary = match draft.salary.parse::<f64>() {
        Ok(s) => Some(s),
        Err(_) => {
            errors.push(ValidationIssue::new("salary", "Salary must be a number"));
            None
        }
    };
    let date_of_joining = match NaiveDate::parse_from_str(&draft.date_of_joining, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(ValidationIssue::new(
                "dateOfJoining",
                "Date of joining must be a valid date (YYYY-MM-DD)",
            ));
            None
        }
    };

    let input = match (department_id, salary, date_of_joining) {
        (Some(department_id), Some(salary), Some(date_of_joining)) => {
            let input = EmployeeInput {
                full_name: draft.full_name.clone(),
                department_id,
                email: draft.email.clone(),
                salary,
                date_of_joining,
            };
            errors.extend(input.validate());

            if !department_repo
                .exists(department_id)
                .await
                .map_err(AppError::from)?
            {
                errors.push(ValidationIssue::new(
                    "departmentId",
                    "Department does not exist",
                ));
            }
            Some(input)
        }
        _ => None,
    };

    let input = match input {
        Some(input) if errors.is_empty() => input,
        _ => return validation_failure(&department_repo, draft, errors).await,
    };

    // Store the image before the insert; a failed write aborts the create.
    // If the insert fails afterwards the stored file is left behind (known gap).
    let profile_picture = match form.profile_image {
        Some(image) => {
            let original_name = image.file_name.as_deref().unwrap_or("upload");
            let stored = storage
                .save(original_name, &image.data)
                .await
                .map_err(AppError::Storage)?;
            Some(stored)
        }
        None => None,
    };

    let employee = employee_repo
        .create(&input, profile_picture)
        .await
        .map_err(AppError::from)?;

    log::info!(
        "Employee {} created by user {}",
        employee.id,
        claims.user_id()
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(employee)))
}

pub async fn update_employee(
    claims: Claims,
    employee_repo: web::Data<EmployeeRepository>,
    department_repo: web::Data<DepartmentRepository>,
    path: web::Path<i64>,
    input: web::Json<UpdateEmployeeInput>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::EditEmployee)?;

    let id = path.into_inner();
    let input = input.into_inner();

    // A path/body id mismatch is treated as not-found, never as an update
    if id != input.id {
        return Err(AppError::NotFound("Employee not found".to_string()).into());
    }

    let fields = EmployeeInput {
        full_name: input.full_name.clone(),
        department_id: input.department_id,
        email: input.email.clone(),
        salary: input.salary,
        date_of_joining: input.date_of_joining,
    };

    let mut errors = fields.validate();
    if !department_repo
        .exists(input.department_id)
        .await
        .map_err(AppError::from)?
    {
        errors.push(ValidationIssue::new(
            "departmentId",
            "Department does not exist",
        ));
    }

    if !errors.is_empty() {
        let draft = EmployeeDraft {
            full_name: input.full_name,
            department_id: input.department_id.to_string(),
            email: input.email,
            salary: input.salary.to_string(),
            date_of_joining: input.date_of_joining.to_string(),
        };
        return validation_failure(&department_repo, draft, errors).await;
    }

    match employee_repo
        .update(id, &fields, input.row_version)
        .await
        .map_err(AppError::from)?
    {
        EmployeeUpdateOutcome::Updated(employee) => {
            log::info!("Employee {} updated by user {}", id, claims.user_id());
            Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
        }
        EmployeeUpdateOutcome::Missing => {
            Err(AppError::NotFound("Employee not found".to_string()).into())
        }
        EmployeeUpdateOutcome::Conflict => Err(AppError::ConcurrencyConflict(
            "Employee was modified by another request".to_string(),
        )
        .into()),
    }
}

/// First step of the two-step delete: fetch the record for confirmation.
pub async fn get_employee_for_delete(
    claims: Claims,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::DeleteEmployee)?;

    let id = path.into_inner();
    let employee = repo
        .find_with_department(id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

/// Second step: actually remove the row. An already-absent id is treated as a
/// completed deletion. The stored profile picture is not removed (known gap).
pub async fn delete_employee(
    claims: Claims,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::DeleteEmployee)?;

    let id = path.into_inner();
    let removed = repo.delete(id).await.map_err(AppError::from)?;

    if removed {
        log::info!("Employee {} deleted by user {}", id, claims.user_id());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Employee deleted",
    )))
}

async fn validation_failure(
    department_repo: &DepartmentRepository,
    draft: EmployeeDraft,
    errors: Vec<ValidationIssue>,
) -> Result<HttpResponse> {
    // Reload the department list so the caller can re-render its selection control
    let departments = department_repo.get_all().await.map_err(AppError::from)?;

    let state = EmployeeFormState {
        values: draft,
        departments,
        errors,
    };

    Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_data(state, "Validation failed")))
}
