use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{Employee, EmployeeInput};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee> {
        let now = Utc::now();

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO
                employees (
                    id,
                    name,
                    email,
                    work_location,
                    office_id,
                    duty_schedule_template_id,
                    custom_work_start_time,
                    custom_work_end_time,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                email,
                work_location,
                office_id,
                duty_schedule_template_id,
                custom_work_start_time,
                custom_work_end_time,
                created_at,
                updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(input.email)
        .bind(input.work_location)
        .bind(input.office_id)
        .bind(input.duty_schedule_template_id)
        .bind(input.custom_work_start_time)
        .bind(input.custom_work_end_time)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT
                id,
                name,
                email,
                work_location,
                office_id,
                duty_schedule_template_id,
                custom_work_start_time,
                custom_work_end_time,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT
                id,
                name,
                email,
                work_location,
                office_id,
                duty_schedule_template_id,
                custom_work_start_time,
                custom_work_end_time,
                created_at,
                updated_at
            FROM
                employees
            ORDER BY
                name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn update(&self, id: Uuid, input: EmployeeInput) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE
                employees
            SET
                name = ?,
                email = ?,
                work_location = ?,
                office_id = ?,
                duty_schedule_template_id = ?,
                custom_work_start_time = ?,
                custom_work_end_time = ?,
                updated_at = ?
            WHERE
                id = ?
            RETURNING
                id,
                name,
                email,
                work_location,
                office_id,
                duty_schedule_template_id,
                custom_work_start_time,
                custom_work_end_time,
                created_at,
                updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.email)
        .bind(input.work_location)
        .bind(input.office_id)
        .bind(input.duty_schedule_template_id)
        .bind(input.custom_work_start_time)
        .bind(input.custom_work_end_time)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
