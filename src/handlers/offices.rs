use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::Claims;
use crate::database::models::OfficeSettingsInput;
use crate::database::repositories::OfficeRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::location::parse_rules;

fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Administrators only".to_string()))
    }
}

/// Reject allow-lists with no usable entry up front; a save that silently
/// locked everyone out would only surface at the next check-in.
fn validate_networks(input: &OfficeSettingsInput) -> Result<(), AppError> {
    if !input.allowed_networks.is_empty() && parse_rules(&input.allowed_networks).is_empty() {
        return Err(AppError::BadRequest(
            "No valid network ranges in the allow-list".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_office(
    claims: Claims,
    input: web::Json<OfficeSettingsInput>,
    repo: web::Data<OfficeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;
    validate_networks(&input)?;

    let office = repo.create(input.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(office)))
}

pub async fn get_offices(
    claims: Claims,
    repo: web::Data<OfficeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let offices = repo.get_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(offices)))
}

pub async fn get_office(
    claims: Claims,
    path: web::Path<Uuid>,
    repo: web::Data<OfficeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let office = repo
        .get_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Office".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(office)))
}

pub async fn update_office(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<OfficeSettingsInput>,
    repo: web::Data<OfficeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;
    validate_networks(&input)?;

    let office = repo
        .update(path.into_inner(), input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Office".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(office)))
}
