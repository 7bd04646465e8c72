use actix_web::{HttpResponse, Result, web};

use crate::AppState;
use crate::database::models::{CreateUserInput, LoginInput, UserInfo};
use crate::database::repositories::UserRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

pub async fn register(
    app_state: web::Data<AppState>,
    input: web::Json<CreateUserInput>,
) -> Result<HttpResponse> {
    match app_state.auth_service.register(input.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(err) => {
            log::warn!("Registration failed: {}", err);
            Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(&err.to_string())))
        }
    }
}

pub async fn login(
    app_state: web::Data<AppState>,
    input: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    match app_state.auth_service.login(input.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(err) => {
            log::warn!("Login failed: {}", err);
            Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::<()>::error("Invalid email or password")))
        }
    }
}

pub async fn me(claims: Claims, user_repo: web::Data<UserRepository>) -> Result<HttpResponse> {
    let user = user_repo
        .find_by_id(claims.user_id())
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserInfo::from(user))))
}
