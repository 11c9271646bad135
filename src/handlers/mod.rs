pub mod attendance;
pub mod early_checkout;
pub mod employees;
pub mod offices;
pub mod shared;
pub mod templates;

use actix_web::web;

/// Route table, shared between `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/attendance")
                    .route("/check-in", web::post().to(attendance::check_in))
                    .route("/check-out", web::post().to(attendance::check_out))
                    .route("/break/start", web::post().to(attendance::start_break))
                    .route("/break/end", web::post().to(attendance::end_break))
                    .route("/location-status", web::get().to(attendance::location_status))
                    .route("/me", web::get().to(attendance::my_day))
                    .route("/schedule", web::get().to(attendance::resolved_schedule))
                    .route("/records", web::get().to(attendance::list_records))
                    .route("/records", web::post().to(attendance::correct_record))
                    .route("/records/day", web::get().to(attendance::employee_day)),
            )
            .service(
                web::scope("/early-checkout")
                    .route("", web::post().to(early_checkout::submit_request))
                    .route("", web::get().to(early_checkout::list_requests))
                    .route("/{id}/approve", web::post().to(early_checkout::approve_request))
                    .route("/{id}/decline", web::post().to(early_checkout::decline_request)),
            )
            .service(
                web::scope("/templates")
                    .route("", web::post().to(templates::create_template))
                    .route("", web::get().to(templates::get_templates))
                    .route("/{id}", web::get().to(templates::get_template))
                    .route("/{id}", web::put().to(templates::update_template))
                    .route("/{id}", web::delete().to(templates::delete_template)),
            )
            .service(
                web::scope("/offices")
                    .route("", web::post().to(offices::create_office))
                    .route("", web::get().to(offices::get_offices))
                    .route("/{id}", web::get().to(offices::get_office))
                    .route("/{id}", web::put().to(offices::update_office)),
            )
            .service(
                web::scope("/employees")
                    .route("", web::post().to(employees::create_employee))
                    .route("", web::get().to(employees::get_employees))
                    .route("/{id}", web::get().to(employees::get_employee))
                    .route("/{id}", web::put().to(employees::update_employee))
                    .route("/{id}", web::delete().to(employees::delete_employee)),
            ),
    );
}
