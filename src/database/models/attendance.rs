use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// One attendance row per employee per calendar day.
///
/// `total_worked_minutes` is a typed column computed once at check-out;
/// `notes` is free text only and never carries derived values.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub break_start_at: Option<NaiveTime>,
    pub break_total_minutes: i64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub total_worked_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrator manual correction. Bypasses the location gate and may set
/// times and status directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAttendanceUpsert {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub in_time: Option<NaiveTime>,
    pub out_time: Option<NaiveTime>,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        HalfDay => "half_day",
        Leave => "leave",
    }
}
