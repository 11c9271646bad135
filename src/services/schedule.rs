use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::database::models::{DutyScheduleTemplate, Employee};
use crate::database::repositories::ScheduleTemplateRepository;

/// Work-day window for one (employee, date) pair. Derived on every view,
/// never persisted: template assignment or custom hours may change
/// between views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSchedule {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl ResolvedSchedule {
    pub fn none() -> Self {
        Self {
            start_time: None,
            end_time: None,
        }
    }

    /// No schedule at all. Classification is skipped entirely.
    pub fn is_empty(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    /// Night-shift windows (end before start) span two calendar days,
    /// anchored to the day the shift starts.
    pub fn wraps_midnight(&self) -> bool {
        matches!(
            (self.start_time, self.end_time),
            (Some(start), Some(end)) if end < start
        )
    }
}

/// Precedence: per-employee custom hours, then the assigned template if
/// the date falls on one of its work days, then nothing. A custom value
/// on one side never blanks the other: the unset side still falls back
/// to the template.
pub fn resolve(
    employee: &Employee,
    template: Option<&DutyScheduleTemplate>,
    date: NaiveDate,
) -> ResolvedSchedule {
    let template_window = template
        .filter(|t| t.is_active && t.runs_on(date.weekday()))
        .map(|t| (t.start_time, t.end_time));

    ResolvedSchedule {
        start_time: employee
            .custom_work_start_time
            .or(template_window.map(|(start, _)| start)),
        end_time: employee
            .custom_work_end_time
            .or(template_window.map(|(_, end)| end)),
    }
}

/// Fetches the assigned template (if any) and resolves the window.
#[derive(Clone)]
pub struct ScheduleResolver {
    templates: ScheduleTemplateRepository,
}

impl ScheduleResolver {
    pub fn new(templates: ScheduleTemplateRepository) -> Self {
        Self { templates }
    }

    pub async fn resolve_for(&self, employee: &Employee, date: NaiveDate) -> Result<ResolvedSchedule> {
        let template = match employee.duty_schedule_template_id {
            Some(template_id) => self.templates.get_by_id(template_id).await?,
            None => None,
        };

        Ok(resolve(employee, template.as_ref(), date))
    }
}
