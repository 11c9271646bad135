use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::Claims;
use crate::database::models::EmployeeInput;
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

fn require_admin(claims: &Claims) -> Result<(), AppError> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Administrators only".to_string()))
    }
}

pub async fn create_employee(
    claims: Claims,
    input: web::Json<EmployeeInput>,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let employee = repo.create(input.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(employee)))
}

pub async fn get_employees(
    claims: Claims,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let employees = repo.get_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employees)))
}

pub async fn get_employee(
    claims: Claims,
    path: web::Path<Uuid>,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    if employee_id != claims.employee_id() {
        require_admin(&claims)?;
    }

    let employee = repo
        .get_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

pub async fn update_employee(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<EmployeeInput>,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let employee = repo
        .update(path.into_inner(), input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee".to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(employee)))
}

pub async fn delete_employee(
    claims: Claims,
    path: web::Path<Uuid>,
    repo: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    if !repo.delete(path.into_inner()).await? {
        return Err(AppError::NotFound("Employee".to_string()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Employee deleted",
    )))
}
