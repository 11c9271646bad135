use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{EarlyCheckoutRequest, EarlyCheckoutRequestInput, EarlyCheckoutStatus};

const REQUEST_COLUMNS: &str = r#"
    id,
    employee_id,
    date,
    reason,
    requested_checkout_time,
    status,
    reviewed_at,
    reviewed_by,
    response_notes,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct EarlyCheckoutRepository {
    pool: SqlitePool,
}

impl EarlyCheckoutRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Multiple pending requests for the same (employee, date) are allowed;
    /// they all surface to the reviewer.
    pub async fn create(
        &self,
        employee_id: Uuid,
        input: EarlyCheckoutRequestInput,
    ) -> Result<EarlyCheckoutRequest> {
        let now = Utc::now();

        let request = sqlx::query_as::<_, EarlyCheckoutRequest>(&format!(
            r#"
            INSERT INTO
                early_checkout_requests (
                    id,
                    employee_id,
                    date,
                    reason,
                    requested_checkout_time,
                    status,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(input.date)
        .bind(input.reason)
        .bind(input.requested_checkout_time)
        .bind(EarlyCheckoutStatus::Pending)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<EarlyCheckoutRequest>> {
        let request = sqlx::query_as::<_, EarlyCheckoutRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM early_checkout_requests
            WHERE id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn get_for_employee(&self, employee_id: Uuid) -> Result<Vec<EarlyCheckoutRequest>> {
        let requests = sqlx::query_as::<_, EarlyCheckoutRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM early_checkout_requests
            WHERE employee_id = ?
            ORDER BY created_at DESC
            "#
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn get_pending(&self) -> Result<Vec<EarlyCheckoutRequest>> {
        let requests = sqlx::query_as::<_, EarlyCheckoutRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM early_checkout_requests
            WHERE status = ?
            ORDER BY created_at DESC
            "#
        ))
        .bind(EarlyCheckoutStatus::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Approved request for the day, if any. Used by the day view to
    /// suppress the early-check-out label without touching the record.
    pub async fn find_approved_for_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<EarlyCheckoutRequest>> {
        let request = sqlx::query_as::<_, EarlyCheckoutRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS}
            FROM early_checkout_requests
            WHERE employee_id = ? AND date = ? AND status = ?
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(employee_id)
        .bind(date)
        .bind(EarlyCheckoutStatus::Approved)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Single allowed transition out of pending. The status guard in the
    /// WHERE clause keeps the transition monotonic under racing reviewers:
    /// the loser matches zero rows and gets `None`.
    pub async fn review(
        &self,
        id: Uuid,
        status: EarlyCheckoutStatus,
        reviewed_by: Uuid,
        response_notes: Option<String>,
    ) -> Result<Option<EarlyCheckoutRequest>> {
        let now = Utc::now();

        let request = sqlx::query_as::<_, EarlyCheckoutRequest>(&format!(
            r#"
            UPDATE early_checkout_requests
            SET
                status = ?,
                reviewed_at = ?,
                reviewed_by = ?,
                response_notes = ?,
                updated_at = ?
            WHERE
                id = ? AND status = ?
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(status)
        .bind(now)
        .bind(reviewed_by)
        .bind(response_notes)
        .bind(now)
        .bind(id)
        .bind(EarlyCheckoutStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }
}
