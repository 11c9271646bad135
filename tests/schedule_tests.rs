use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

mod common;

use common::{EmployeeBuilder, TestContext, time};

const WEEKDAYS: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];

// 2025-06-02 is a Monday, 2025-06-07 a Saturday.
const MONDAY: &str = "2025-06-02";
const SATURDAY: &str = "2025-06-07";

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn template_schedule_applies_on_work_days_only() {
    let ctx = TestContext::new().await.unwrap();
    let template = ctx.seed_template(time(9, 0), time(17, 0), &WEEKDAYS).await;
    let employee = ctx
        .seed_employee(EmployeeBuilder::on_site().template(template.id))
        .await;
    let token = ctx.token_for(&employee);
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/schedule?date={}", MONDAY))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["startTime"], json!("09:00:00"));
    assert_eq!(body["data"]["endTime"], json!("17:00:00"));

    // Off-day: no schedule is a normal outcome, not an error.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/schedule?date={}", SATURDAY))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].is_null());
}

#[actix_web::test]
async fn custom_hours_take_precedence_over_template() {
    let ctx = TestContext::new().await.unwrap();
    let template = ctx.seed_template(time(9, 0), time(17, 0), &WEEKDAYS).await;
    let employee = ctx
        .seed_employee(
            EmployeeBuilder::on_site()
                .template(template.id)
                .custom_hours(Some(time(10, 0)), Some(time(18, 0))),
        )
        .await;
    let token = ctx.token_for(&employee);
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/schedule?date={}", MONDAY))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["startTime"], json!("10:00:00"));
    assert_eq!(body["data"]["endTime"], json!("18:00:00"));
}

#[actix_web::test]
async fn partial_custom_hours_fall_back_to_template() {
    let ctx = TestContext::new().await.unwrap();
    let template = ctx.seed_template(time(9, 0), time(17, 0), &WEEKDAYS).await;
    let employee = ctx
        .seed_employee(
            EmployeeBuilder::on_site()
                .template(template.id)
                .custom_hours(Some(time(8, 0)), None),
        )
        .await;
    let token = ctx.token_for(&employee);
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/attendance/schedule?date={}", MONDAY))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["startTime"], json!("08:00:00"));
    assert_eq!(body["data"]["endTime"], json!("17:00:00"));
}

#[actix_web::test]
async fn template_crud_is_admin_only() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    let payload = json!({
        "name": "Night Watch",
        "shiftType": "night",
        "startTime": "22:00:00",
        "endTime": "06:00:00",
        "workDays": ["Monday", "Tuesday"],
        "isActive": true
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/templates")
        .insert_header(bearer(&token))
        .set_json(&payload)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/templates")
        .insert_header(bearer(&admin))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    // Weekday names are stored lowercased.
    assert_eq!(body["data"]["workDays"], json!(r#"["monday","tuesday"]"#));
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/templates/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["shiftType"], json!("night"));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/templates/{}", id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn day_view_classifies_against_resolved_schedule() {
    let ctx = TestContext::new().await.unwrap();
    let template = ctx.seed_template(time(9, 0), time(17, 0), &WEEKDAYS).await;
    let employee = ctx
        .seed_employee(EmployeeBuilder::on_site().template(template.id))
        .await;
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/records")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "employeeId": employee.id,
            "date": MONDAY,
            "inTime": "08:50:00",
            "outTime": "13:00:00",
            "status": "present"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/attendance/records/day?employeeId={}&date={}",
            employee.id, MONDAY
        ))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["data"]["labels"],
        json!(["early_check_in", "early_check_out"])
    );
    assert_eq!(body["data"]["record"]["totalWorkedMinutes"], json!(250));
}

#[actix_web::test]
async fn day_view_skips_classification_without_a_schedule() {
    let ctx = TestContext::new().await.unwrap();
    let template = ctx.seed_template(time(9, 0), time(17, 0), &WEEKDAYS).await;
    let employee = ctx
        .seed_employee(EmployeeBuilder::on_site().template(template.id))
        .await;
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    // Saturday is outside the template's work days.
    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/records")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "employeeId": employee.id,
            "date": SATURDAY,
            "inTime": "11:00:00",
            "outTime": "12:00:00",
            "status": "present"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/attendance/records/day?employeeId={}&date={}",
            employee.id, SATURDAY
        ))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["labels"], json!([]));
    assert!(body["data"]["schedule"].is_null());
}
