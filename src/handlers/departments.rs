use actix_web::{HttpResponse, Result, web};

use crate::database::models::DepartmentInput;
use crate::database::repositories::{DepartmentDeleteOutcome, DepartmentRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::access::{self, Operation};
use crate::services::auth::{Claims, MaybeClaims};

pub async fn list_departments(
    MaybeClaims(claims): MaybeClaims,
    repo: web::Data<DepartmentRepository>,
) -> Result<HttpResponse> {
    access::authorize(claims.as_ref(), Operation::ListDepartments)?;

    let departments = repo.get_all().await.map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(departments)))
}

pub async fn get_department(
    MaybeClaims(claims): MaybeClaims,
    repo: web::Data<DepartmentRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    access::authorize(claims.as_ref(), Operation::DepartmentDetails)?;

    let department = repo
        .find_by_id(path.into_inner())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(department)))
}

pub async fn create_department(
    claims: Claims,
    repo: web::Data<DepartmentRepository>,
    input: web::Json<DepartmentInput>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::CreateDepartment)?;

    let input = input.into_inner();
    input.validate().map_err(AppError::Validation)?;

    let department = repo.create(input).await.map_err(AppError::from)?;

    log::info!(
        "Department {} created by user {}",
        department.id,
        claims.user_id()
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(department)))
}

pub async fn update_department(
    claims: Claims,
    repo: web::Data<DepartmentRepository>,
    path: web::Path<i64>,
    input: web::Json<DepartmentInput>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::EditDepartment)?;

    let input = input.into_inner();
    input.validate().map_err(AppError::Validation)?;

    let department = repo
        .update(path.into_inner(), input)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(department)))
}

/// Delete is rejected while employees still reference the department.
pub async fn delete_department(
    claims: Claims,
    repo: web::Data<DepartmentRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::DeleteDepartment)?;

    let id = path.into_inner();
    match repo.delete(id).await.map_err(AppError::from)? {
        DepartmentDeleteOutcome::Deleted | DepartmentDeleteOutcome::Missing => {
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
                None,
                "Department deleted",
            )))
        }
        DepartmentDeleteOutcome::Referenced(count) => Err(AppError::Validation(format!(
            "Department has {} employee(s) and cannot be deleted",
            count
        ))
        .into()),
    }
}
