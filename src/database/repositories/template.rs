use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{DutyScheduleTemplate, DutyScheduleTemplateInput};

#[derive(Clone)]
pub struct ScheduleTemplateRepository {
    pool: SqlitePool,
}

impl ScheduleTemplateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: DutyScheduleTemplateInput) -> Result<DutyScheduleTemplate> {
        let now = Utc::now();
        let work_days = serde_json::to_string(&normalize_days(&input.work_days))?;

        let template = sqlx::query_as::<_, DutyScheduleTemplate>(
            r#"
            INSERT INTO
                duty_schedule_templates (
                    id,
                    name,
                    shift_type,
                    start_time,
                    end_time,
                    work_days,
                    is_active,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                shift_type,
                start_time,
                end_time,
                work_days,
                is_active,
                created_at,
                updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(input.shift_type)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(work_days)
        .bind(input.is_active)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<DutyScheduleTemplate>> {
        let template = sqlx::query_as::<_, DutyScheduleTemplate>(
            r#"
            SELECT
                id,
                name,
                shift_type,
                start_time,
                end_time,
                work_days,
                is_active,
                created_at,
                updated_at
            FROM
                duty_schedule_templates
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn get_all(&self) -> Result<Vec<DutyScheduleTemplate>> {
        let templates = sqlx::query_as::<_, DutyScheduleTemplate>(
            r#"
            SELECT
                id,
                name,
                shift_type,
                start_time,
                end_time,
                work_days,
                is_active,
                created_at,
                updated_at
            FROM
                duty_schedule_templates
            ORDER BY
                name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(templates)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: DutyScheduleTemplateInput,
    ) -> Result<Option<DutyScheduleTemplate>> {
        let work_days = serde_json::to_string(&normalize_days(&input.work_days))?;

        let template = sqlx::query_as::<_, DutyScheduleTemplate>(
            r#"
            UPDATE
                duty_schedule_templates
            SET
                name = ?,
                shift_type = ?,
                start_time = ?,
                end_time = ?,
                work_days = ?,
                is_active = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                shift_type,
                start_time,
                end_time,
                work_days,
                is_active,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.shift_type)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(work_days)
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(template)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM duty_schedule_templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Weekday names are matched case-insensitively; store them lowercased.
fn normalize_days(days: &[String]) -> Vec<String> {
    days.iter().map(|d| d.to_lowercase()).collect()
}
