use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use attendly::database::{
    init_database,
    repositories::{
        AttendanceRepository, EarlyCheckoutRepository, EmployeeRepository, OfficeRepository,
        ScheduleTemplateRepository,
    },
};
use attendly::services::{
    AttendanceService, EarlyCheckoutService, LocationGate, ScheduleResolver,
};
use attendly::{Config, handlers};

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!(
        "Configuration loaded (environment: {})",
        config.environment
    );

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    let employee_repository = EmployeeRepository::new(pool.clone());
    let template_repository = ScheduleTemplateRepository::new(pool.clone());
    let office_repository = OfficeRepository::new(pool.clone());
    let attendance_repository = AttendanceRepository::new(pool.clone());
    let early_checkout_repository = EarlyCheckoutRepository::new(pool.clone());

    let schedule_resolver = ScheduleResolver::new(template_repository.clone());
    let location_gate = LocationGate::new(office_repository.clone());
    let attendance_service = AttendanceService::new(attendance_repository);
    let early_checkout_service = EarlyCheckoutService::new(early_checkout_repository);

    let employee_repo_data = web::Data::new(employee_repository);
    let template_repo_data = web::Data::new(template_repository);
    let office_repo_data = web::Data::new(office_repository);
    let schedule_resolver_data = web::Data::new(schedule_resolver);
    let location_gate_data = web::Data::new(location_gate);
    let attendance_service_data = web::Data::new(attendance_service);
    let early_checkout_service_data = web::Data::new(early_checkout_service);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(employee_repo_data.clone())
            .app_data(template_repo_data.clone())
            .app_data(office_repo_data.clone())
            .app_data(schedule_resolver_data.clone())
            .app_data(location_gate_data.clone())
            .app_data(attendance_service_data.clone())
            .app_data(early_checkout_service_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health)
            .configure(handlers::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
