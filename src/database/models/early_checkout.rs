use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// Employee-initiated, admin-reviewed request to leave before the
/// scheduled end time. Status only ever moves pending -> approved or
/// pending -> declined.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EarlyCheckoutRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub reason: String,
    pub requested_checkout_time: NaiveTime,
    pub status: EarlyCheckoutStatus,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<Uuid>,
    pub response_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarlyCheckoutRequestInput {
    pub date: NaiveDate,
    pub reason: String,
    pub requested_checkout_time: NaiveTime,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum EarlyCheckoutStatus {
        Pending => "pending",
        Approved => "approved",
        Declined => "declined",
    }
}
