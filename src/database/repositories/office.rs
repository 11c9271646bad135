use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{OfficeSettings, OfficeSettingsInput};

#[derive(Clone)]
pub struct OfficeRepository {
    pool: SqlitePool,
}

impl OfficeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: OfficeSettingsInput) -> Result<OfficeSettings> {
        let now = Utc::now();
        let allowed_networks = serde_json::to_string(&input.allowed_networks)?;

        let office = sqlx::query_as::<_, OfficeSettings>(
            r#"
            INSERT INTO
                office_settings (id, name, allowed_networks, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                allowed_networks,
                created_at,
                updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(allowed_networks)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(office)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<OfficeSettings>> {
        let office = sqlx::query_as::<_, OfficeSettings>(
            r#"
            SELECT
                id,
                name,
                allowed_networks,
                created_at,
                updated_at
            FROM
                office_settings
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(office)
    }

    pub async fn get_all(&self) -> Result<Vec<OfficeSettings>> {
        let offices = sqlx::query_as::<_, OfficeSettings>(
            r#"
            SELECT
                id,
                name,
                allowed_networks,
                created_at,
                updated_at
            FROM
                office_settings
            ORDER BY
                name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(offices)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: OfficeSettingsInput,
    ) -> Result<Option<OfficeSettings>> {
        let allowed_networks = serde_json::to_string(&input.allowed_networks)?;

        let office = sqlx::query_as::<_, OfficeSettings>(
            r#"
            UPDATE
                office_settings
            SET
                name = ?,
                allowed_networks = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                allowed_networks,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(allowed_networks)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(office)
    }
}
