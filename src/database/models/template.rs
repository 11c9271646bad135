use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

/// Named, reusable work-hours definition assignable to many employees.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DutyScheduleTemplate {
    pub id: Uuid,
    pub name: String,
    pub shift_type: ShiftType,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// JSON array of lowercase weekday names as stored in SQLite.
    pub work_days: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyScheduleTemplateInput {
    pub name: String,
    pub shift_type: ShiftType,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub work_days: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum ShiftType {
        Regular => "regular",
        Rotating => "rotating",
        Flexible => "flexible",
        Night => "night",
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

impl DutyScheduleTemplate {
    pub fn work_day_names(&self) -> Vec<String> {
        serde_json::from_str::<Vec<String>>(&self.work_days).unwrap_or_default()
    }

    /// Weekday membership is case-insensitive.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        let name = weekday_name(weekday);
        self.work_day_names()
            .iter()
            .any(|d| d.to_lowercase() == name)
    }
}
