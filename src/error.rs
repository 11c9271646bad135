use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::handlers::shared::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    // State-conflict errors: recoverable, surfaced with a specific message.
    #[error("Already checked in for this date")]
    AlreadyCheckedIn,

    #[error("Already checked out for this date")]
    AlreadyCheckedOut,

    #[error("No check-in found for this date")]
    NotCheckedIn,

    #[error("A break is already in progress")]
    BreakAlreadyStarted,

    #[error("No break is in progress")]
    BreakNotStarted,

    #[error("Request has already been reviewed")]
    AlreadyReviewed,

    // Data anomaly: rejected at the boundary instead of storing a
    // negative duration.
    #[error("Check-out time is earlier than check-in time")]
    CheckOutBeforeCheckIn,

    #[error("Attendance actions are not allowed from your current network location")]
    LocationDenied,

    #[error("Your network location could not be determined")]
    LocationUnknown,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyCheckedIn
            | AppError::AlreadyCheckedOut
            | AppError::NotCheckedIn
            | AppError::BreakAlreadyStarted
            | AppError::BreakNotStarted
            | AppError::AlreadyReviewed => StatusCode::CONFLICT,
            AppError::CheckOutBeforeCheckIn => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::LocationDenied | AppError::LocationUnknown | AppError::Forbidden(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        if status_code.is_server_error() {
            log::error!("Request failed with status {}: {}", status_code, error_message);
        } else {
            log::debug!("Request rejected with status {}: {}", status_code, error_message);
        }

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&error_message))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        log::error!("Database error: {}", error);
        AppError::Database(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        // Preserve sqlx errors bubbled up through anyhow in the repositories.
        match error.downcast::<sqlx::Error>() {
            Ok(sqlx_err) => AppError::Database(sqlx_err),
            Err(other) => {
                log::error!("Internal error: {}", other);
                AppError::Internal(other.to_string())
            }
        }
    }
}
