use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{AdminAttendanceUpsert, AttendanceRecord, AttendanceStatus};

const RECORD_COLUMNS: &str = r#"
    id,
    employee_id,
    date,
    in_time,
    out_time,
    break_start_at,
    break_total_minutes,
    status,
    notes,
    total_worked_minutes,
    created_at,
    updated_at
"#;

/// Daily attendance rows. Mutations that must happen at most once carry
/// their precondition in the WHERE clause, so a racing duplicate comes
/// back as zero rows instead of overwriting state.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_for_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM attendance
            WHERE employee_id = ? AND date = ?
            "#
        ))
        .bind(employee_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn get_all_for_date(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM attendance
            WHERE date = ?
            ORDER BY created_at
            "#
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// First check-in of the day creates the row.
    pub async fn insert_check_in(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        in_time: NaiveTime,
    ) -> Result<AttendanceRecord> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO
                attendance (id, employee_id, date, in_time, status, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?, ?, ?)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(date)
        .bind(in_time)
        .bind(AttendanceStatus::Present)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Fill the check-in on a row an admin created without one (e.g. a
    /// pre-marked absence). Zero rows means the check-in already happened.
    pub async fn fill_check_in(
        &self,
        id: Uuid,
        in_time: NaiveTime,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET
                in_time = ?,
                status = ?,
                updated_at = ?
            WHERE
                id = ? AND in_time IS NULL
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(in_time)
        .bind(AttendanceStatus::Present)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn set_check_out(
        &self,
        id: Uuid,
        out_time: NaiveTime,
        break_total_minutes: i64,
        total_worked_minutes: i64,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET
                out_time = ?,
                break_start_at = NULL,
                break_total_minutes = ?,
                total_worked_minutes = ?,
                updated_at = ?
            WHERE
                id = ? AND in_time IS NOT NULL AND out_time IS NULL
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(out_time)
        .bind(break_total_minutes)
        .bind(total_worked_minutes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn set_break_start(
        &self,
        id: Uuid,
        at: NaiveTime,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET
                break_start_at = ?,
                updated_at = ?
            WHERE
                id = ?
                AND in_time IS NOT NULL
                AND out_time IS NULL
                AND break_start_at IS NULL
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(at)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn set_break_end(
        &self,
        id: Uuid,
        break_total_minutes: i64,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET
                break_start_at = NULL,
                break_total_minutes = ?,
                updated_at = ?
            WHERE
                id = ? AND break_start_at IS NOT NULL
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(break_total_minutes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Administrator correction on a day with no existing row.
    pub async fn insert_correction(
        &self,
        input: &AdminAttendanceUpsert,
        total_worked_minutes: Option<i64>,
    ) -> Result<AttendanceRecord> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            INSERT INTO
                attendance (
                    id,
                    employee_id,
                    date,
                    in_time,
                    out_time,
                    status,
                    notes,
                    total_worked_minutes,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(input.employee_id)
        .bind(input.date)
        .bind(input.in_time)
        .bind(input.out_time)
        .bind(input.status)
        .bind(input.notes.as_deref())
        .bind(total_worked_minutes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    /// Administrator correction overwriting an existing row. A break left
    /// open on the row is discarded; the accumulated total stands.
    pub async fn update_correction(
        &self,
        id: Uuid,
        input: &AdminAttendanceUpsert,
        total_worked_minutes: Option<i64>,
    ) -> Result<Option<AttendanceRecord>> {
        let record = sqlx::query_as::<_, AttendanceRecord>(&format!(
            r#"
            UPDATE attendance
            SET
                in_time = ?,
                out_time = ?,
                break_start_at = NULL,
                status = ?,
                notes = ?,
                total_worked_minutes = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(input.in_time)
        .bind(input.out_time)
        .bind(input.status)
        .bind(input.notes.as_deref())
        .bind(total_worked_minutes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
