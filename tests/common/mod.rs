#![allow(dead_code)]

use actix_web::{App, web};
use anyhow::Result;
use chrono::NaiveTime;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tempfile::NamedTempFile;
use uuid::Uuid;

use attendly::Config;
use attendly::auth;
use attendly::database::models::{
    DutyScheduleTemplate, DutyScheduleTemplateInput, Employee, EmployeeInput, OfficeSettings,
    OfficeSettingsInput, ShiftType, WorkLocation,
};
use attendly::database::repositories::{
    AttendanceRepository, EarlyCheckoutRepository, EmployeeRepository, OfficeRepository,
    ScheduleTemplateRepository,
};
use attendly::handlers;
use attendly::services::{
    AttendanceService, EarlyCheckoutService, LocationGate, ScheduleResolver,
};

/// Isolated test environment: a fresh tempfile SQLite database with
/// migrations applied, plus seeding helpers.
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub employees: EmployeeRepository,
    pub templates: ScheduleTemplateRepository,
    pub offices: OfficeRepository,
    _temp_file: NamedTempFile,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let database_url = format!("sqlite:{}", temp_file.path().display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        let config = Config {
            database_url,
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_days: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
        };

        Ok(TestContext {
            employees: EmployeeRepository::new(pool.clone()),
            templates: ScheduleTemplateRepository::new(pool.clone()),
            offices: OfficeRepository::new(pool.clone()),
            pool,
            config,
            _temp_file: temp_file,
        })
    }

    /// Actix app wired exactly like `main`, minus the HTTP listener.
    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let employee_repository = EmployeeRepository::new(self.pool.clone());
        let template_repository = ScheduleTemplateRepository::new(self.pool.clone());
        let office_repository = OfficeRepository::new(self.pool.clone());
        let attendance_repository = AttendanceRepository::new(self.pool.clone());
        let early_checkout_repository = EarlyCheckoutRepository::new(self.pool.clone());

        App::new()
            .app_data(web::Data::new(employee_repository))
            .app_data(web::Data::new(template_repository.clone()))
            .app_data(web::Data::new(office_repository.clone()))
            .app_data(web::Data::new(ScheduleResolver::new(template_repository)))
            .app_data(web::Data::new(LocationGate::new(office_repository)))
            .app_data(web::Data::new(AttendanceService::new(
                attendance_repository,
            )))
            .app_data(web::Data::new(EarlyCheckoutService::new(
                early_checkout_repository,
            )))
            .app_data(web::Data::new(self.config.clone()))
            .configure(handlers::configure)
    }

    pub fn token_for(&self, employee: &Employee) -> String {
        auth::create_token(employee.id, &employee.email, "employee", &self.config)
            .expect("token creation failed")
    }

    pub fn admin_token(&self) -> String {
        auth::create_token(Uuid::new_v4(), "admin@example.com", "admin", &self.config)
            .expect("token creation failed")
    }

    pub async fn seed_office(&self, allowed_networks: &[&str]) -> OfficeSettings {
        self.offices
            .create(OfficeSettingsInput {
                name: "Head Office".to_string(),
                allowed_networks: allowed_networks.iter().map(|s| s.to_string()).collect(),
            })
            .await
            .expect("office seeding failed")
    }

    pub async fn seed_template(
        &self,
        start: NaiveTime,
        end: NaiveTime,
        work_days: &[&str],
    ) -> DutyScheduleTemplate {
        self.templates
            .create(DutyScheduleTemplateInput {
                name: "Office Hours".to_string(),
                shift_type: ShiftType::Regular,
                start_time: start,
                end_time: end,
                work_days: work_days.iter().map(|s| s.to_string()).collect(),
                is_active: true,
            })
            .await
            .expect("template seeding failed")
    }

    pub async fn seed_employee(&self, input: EmployeeBuilder) -> Employee {
        self.employees
            .create(EmployeeInput {
                name: Name().fake(),
                email: SafeEmail().fake(),
                work_location: input.work_location,
                office_id: input.office_id,
                duty_schedule_template_id: input.template_id,
                custom_work_start_time: input.custom_start,
                custom_work_end_time: input.custom_end,
            })
            .await
            .expect("employee seeding failed")
    }
}

pub struct EmployeeBuilder {
    pub work_location: WorkLocation,
    pub office_id: Option<Uuid>,
    pub template_id: Option<Uuid>,
    pub custom_start: Option<NaiveTime>,
    pub custom_end: Option<NaiveTime>,
}

impl EmployeeBuilder {
    fn new(work_location: WorkLocation) -> Self {
        Self {
            work_location,
            office_id: None,
            template_id: None,
            custom_start: None,
            custom_end: None,
        }
    }

    pub fn on_site() -> Self {
        Self::new(WorkLocation::OnSite)
    }

    pub fn remote() -> Self {
        Self::new(WorkLocation::Remote)
    }

    pub fn office(mut self, office_id: Uuid) -> Self {
        self.office_id = Some(office_id);
        self
    }

    pub fn template(mut self, template_id: Uuid) -> Self {
        self.template_id = Some(template_id);
        self
    }

    pub fn custom_hours(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.custom_start = start;
        self.custom_end = end;
        self
    }
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
