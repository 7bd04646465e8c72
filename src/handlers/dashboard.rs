use actix_web::{HttpResponse, Result, web};

use crate::database::repositories::DashboardRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::access::{self, Operation};
use crate::services::auth::Claims;

/// Admin-only payroll dashboard. The gate runs before any query executes.
pub async fn get_dashboard(
    claims: Claims,
    repo: web::Data<DashboardRepository>,
) -> Result<HttpResponse> {
    access::authorize(Some(&claims), Operation::DashboardSummary)?;

    let snapshot = repo.summarize().await.map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}
