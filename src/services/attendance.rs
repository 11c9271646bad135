use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::database::models::{AdminAttendanceUpsert, AttendanceRecord};
use crate::database::repositories::AttendanceRepository;
use crate::error::AppError;

/// Daily attendance ledger. State-conflict checks happen here before any
/// write, and the repository's guarded updates back them up under races.
#[derive(Clone)]
pub struct AttendanceService {
    records: AttendanceRepository,
}

impl AttendanceService {
    pub fn new(records: AttendanceRepository) -> Self {
        Self { records }
    }

    pub async fn check_in(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AppError> {
        match self.records.get_for_date(employee_id, date).await? {
            Some(record) if record.in_time.is_some() => Err(AppError::AlreadyCheckedIn),
            Some(record) => self
                .records
                .fill_check_in(record.id, time)
                .await?
                .ok_or(AppError::AlreadyCheckedIn),
            None => match self.records.insert_check_in(employee_id, date, time).await {
                Ok(record) => Ok(record),
                // A racing duplicate submission loses to the unique index;
                // report it the same way as the lookup path.
                Err(err) => match err.downcast_ref::<sqlx::Error>() {
                    Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                        Err(AppError::AlreadyCheckedIn)
                    }
                    _ => Err(err.into()),
                },
            },
        }
    }

    pub async fn check_out(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AppError> {
        let record = self
            .records
            .get_for_date(employee_id, date)
            .await?
            .ok_or(AppError::NotCheckedIn)?;

        let in_time = record.in_time.ok_or(AppError::NotCheckedIn)?;
        if record.out_time.is_some() {
            return Err(AppError::AlreadyCheckedOut);
        }

        // Same-day wall-clock subtraction only. An out-time before the
        // in-time is a data-entry anomaly, not a storable duration.
        if time < in_time {
            return Err(AppError::CheckOutBeforeCheckIn);
        }

        // A break left open at check-out is folded in rather than lost.
        let mut break_total = record.break_total_minutes;
        if let Some(break_start) = record.break_start_at {
            if time > break_start {
                break_total += (time - break_start).num_minutes();
            }
        }

        let worked = ((time - in_time).num_minutes() - break_total).max(0);

        self.records
            .set_check_out(record.id, time, break_total, worked)
            .await?
            .ok_or(AppError::AlreadyCheckedOut)
    }

    pub async fn start_break(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AppError> {
        let record = self
            .records
            .get_for_date(employee_id, date)
            .await?
            .ok_or(AppError::NotCheckedIn)?;

        if record.in_time.is_none() {
            return Err(AppError::NotCheckedIn);
        }
        if record.out_time.is_some() {
            return Err(AppError::AlreadyCheckedOut);
        }
        if record.break_start_at.is_some() {
            return Err(AppError::BreakAlreadyStarted);
        }

        self.records
            .set_break_start(record.id, time)
            .await?
            .ok_or(AppError::BreakAlreadyStarted)
    }

    pub async fn end_break(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<AttendanceRecord, AppError> {
        let record = self
            .records
            .get_for_date(employee_id, date)
            .await?
            .ok_or(AppError::NotCheckedIn)?;

        if record.out_time.is_some() {
            return Err(AppError::AlreadyCheckedOut);
        }

        let break_start = record.break_start_at.ok_or(AppError::BreakNotStarted)?;
        let minutes = (time - break_start).num_minutes().max(0);

        self.records
            .set_break_end(record.id, record.break_total_minutes + minutes)
            .await?
            .ok_or(AppError::BreakNotStarted)
    }

    pub async fn get_for_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AppError> {
        Ok(self.records.get_for_date(employee_id, date).await?)
    }

    pub async fn get_all_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(self.records.get_all_for_date(date).await?)
    }

    /// Administrator manual correction. Not location-gated; may set times
    /// and status directly. The worked total is recomputed whenever both
    /// times are present, net of any break minutes already on the row, and
    /// the same-day anomaly check still applies.
    pub async fn admin_correct(
        &self,
        input: AdminAttendanceUpsert,
    ) -> Result<AttendanceRecord, AppError> {
        // Lookup first: existing rows are updated in place so a correction
        // never produces a second row for the day, and their accumulated
        // break minutes still count against the corrected total.
        let existing = self
            .records
            .get_for_date(input.employee_id, input.date)
            .await?;

        let break_total = existing
            .as_ref()
            .map(|record| record.break_total_minutes)
            .unwrap_or(0);

        let total_worked_minutes = match (input.in_time, input.out_time) {
            (Some(in_time), Some(out_time)) => {
                if out_time < in_time {
                    return Err(AppError::CheckOutBeforeCheckIn);
                }
                Some(((out_time - in_time).num_minutes() - break_total).max(0))
            }
            _ => None,
        };

        match existing {
            Some(existing) => self
                .records
                .update_correction(existing.id, &input, total_worked_minutes)
                .await?
                .ok_or_else(|| AppError::NotFound("Attendance record".to_string())),
            None => Ok(self
                .records
                .insert_correction(&input, total_worked_minutes)
                .await?),
        }
    }
}
