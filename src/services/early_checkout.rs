use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::{
    EarlyCheckoutRequest, EarlyCheckoutRequestInput, EarlyCheckoutStatus,
};
use crate::database::repositories::EarlyCheckoutRepository;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Decline,
}

impl ReviewDecision {
    fn into_status(self) -> EarlyCheckoutStatus {
        match self {
            ReviewDecision::Approve => EarlyCheckoutStatus::Approved,
            ReviewDecision::Decline => EarlyCheckoutStatus::Declined,
        }
    }
}

/// Request/approval state machine: pending -> approved or declined, both
/// terminal. An approved request sanctions the early departure; the day
/// view joins against it to suppress the early-check-out label.
#[derive(Clone)]
pub struct EarlyCheckoutService {
    requests: EarlyCheckoutRepository,
}

impl EarlyCheckoutService {
    pub fn new(requests: EarlyCheckoutRepository) -> Self {
        Self { requests }
    }

    pub async fn submit(
        &self,
        employee_id: Uuid,
        input: EarlyCheckoutRequestInput,
    ) -> Result<EarlyCheckoutRequest, AppError> {
        if input.reason.trim().is_empty() {
            return Err(AppError::BadRequest("A reason is required".to_string()));
        }

        Ok(self.requests.create(employee_id, input).await?)
    }

    pub async fn review(
        &self,
        request_id: Uuid,
        decision: ReviewDecision,
        reviewer_id: Uuid,
        notes: Option<String>,
    ) -> Result<EarlyCheckoutRequest, AppError> {
        self.requests
            .get_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Early-checkout request".to_string()))?;

        // The guarded update only matches pending rows, so a request that
        // reached a terminal state in the meantime is left untouched.
        self.requests
            .review(request_id, decision.into_status(), reviewer_id, notes)
            .await?
            .ok_or(AppError::AlreadyReviewed)
    }

    pub async fn get_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<EarlyCheckoutRequest>, AppError> {
        Ok(self.requests.get_for_employee(employee_id).await?)
    }

    pub async fn get_pending(&self) -> Result<Vec<EarlyCheckoutRequest>, AppError> {
        Ok(self.requests.get_pending().await?)
    }

    pub async fn has_approved_for_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool, AppError> {
        Ok(self
            .requests
            .find_approved_for_date(employee_id, date)
            .await?
            .is_some())
    }
}
