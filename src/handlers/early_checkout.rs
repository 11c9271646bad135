use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::Claims;
use crate::database::models::EarlyCheckoutRequestInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{EarlyCheckoutService, ReviewDecision};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub notes: Option<String>,
}

pub async fn submit_request(
    claims: Claims,
    input: web::Json<EarlyCheckoutRequestInput>,
    service: web::Data<EarlyCheckoutService>,
) -> Result<HttpResponse, AppError> {
    let request = service
        .submit(claims.employee_id(), input.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(request)))
}

/// Employees see their own requests; administrators see the pending queue.
pub async fn list_requests(
    claims: Claims,
    service: web::Data<EarlyCheckoutService>,
) -> Result<HttpResponse, AppError> {
    let requests = if claims.is_admin() {
        service.get_pending().await?
    } else {
        service.get_for_employee(claims.employee_id()).await?
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

pub async fn approve_request(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<ReviewRequest>,
    service: web::Data<EarlyCheckoutService>,
) -> Result<HttpResponse, AppError> {
    review(claims, path.into_inner(), ReviewDecision::Approve, input.into_inner(), &service).await
}

pub async fn decline_request(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<ReviewRequest>,
    service: web::Data<EarlyCheckoutService>,
) -> Result<HttpResponse, AppError> {
    review(claims, path.into_inner(), ReviewDecision::Decline, input.into_inner(), &service).await
}

async fn review(
    claims: Claims,
    request_id: Uuid,
    decision: ReviewDecision,
    input: ReviewRequest,
    service: &EarlyCheckoutService,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Administrators only".to_string()));
    }

    let request = service
        .review(request_id, decision, claims.employee_id(), input.notes)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}
