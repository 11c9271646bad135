use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// Employee as seen by the attendance subsystem. Profile data beyond what
/// schedule resolution and the location gate need lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub work_location: WorkLocation,
    pub office_id: Option<Uuid>,
    pub duty_schedule_template_id: Option<Uuid>,
    pub custom_work_start_time: Option<NaiveTime>,
    pub custom_work_end_time: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub name: String,
    pub email: String,
    pub work_location: WorkLocation,
    pub office_id: Option<Uuid>,
    pub duty_schedule_template_id: Option<Uuid>,
    pub custom_work_start_time: Option<NaiveTime>,
    pub custom_work_end_time: Option<NaiveTime>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum WorkLocation {
        Remote => "remote",
        OnSite => "on_site",
    }
}

impl Employee {
    /// Remote staff are never subject to the location gate.
    pub fn is_remote(&self) -> bool {
        self.work_location == WorkLocation::Remote
    }
}
