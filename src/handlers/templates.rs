use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::Claims;
use crate::database::models::DutyScheduleTemplateInput;
use crate::database::repositories::ScheduleTemplateRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Administrators only".to_string()))
    }
}

pub async fn create_template(
    claims: Claims,
    input: web::Json<DutyScheduleTemplateInput>,
    repo: web::Data<ScheduleTemplateRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let template = repo.create(input.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(template)))
}

pub async fn get_templates(
    _claims: Claims,
    repo: web::Data<ScheduleTemplateRepository>,
) -> Result<HttpResponse, AppError> {
    let templates = repo.get_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(templates)))
}

pub async fn get_template(
    _claims: Claims,
    path: web::Path<Uuid>,
    repo: web::Data<ScheduleTemplateRepository>,
) -> Result<HttpResponse, AppError> {
    let template = repo
        .get_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Duty schedule template".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(template)))
}

pub async fn update_template(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<DutyScheduleTemplateInput>,
    repo: web::Data<ScheduleTemplateRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let template = repo
        .update(path.into_inner(), input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Duty schedule template".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(template)))
}

pub async fn delete_template(
    claims: Claims,
    path: web::Path<Uuid>,
    repo: web::Data<ScheduleTemplateRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    if !repo.delete(path.into_inner()).await? {
        return Err(AppError::NotFound("Duty schedule template".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Template deleted",
    )))
}
