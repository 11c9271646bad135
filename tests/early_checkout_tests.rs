use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

mod common;

use common::{EmployeeBuilder, TestContext, time};

const WEEKDAYS: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];
const MONDAY: &str = "2025-06-02";

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

fn request_payload() -> Value {
    json!({
        "date": MONDAY,
        "reason": "Doctor's appointment",
        "requestedCheckoutTime": "15:30:00"
    })
}

#[actix_web::test]
async fn submit_and_approve_flow() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .set_json(request_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], json!("pending"));
    assert!(body["data"]["reviewedAt"].is_null());
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // The pending queue surfaces it to the reviewer.
    let req = test::TestRequest::get()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/early-checkout/{}/approve", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "notes": "Approved, get well soon" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], json!("approved"));
    assert!(!body["data"]["reviewedAt"].is_null());
    assert_eq!(body["data"]["responseNotes"], json!("Approved, get well soon"));
}

#[actix_web::test]
async fn reviewing_a_reviewed_request_conflicts_and_changes_nothing() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .set_json(request_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/early-checkout/{}/approve", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "notes": "first review" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let reviewed_at = body["data"]["reviewedAt"].clone();

    // Terminal state: a second review must not overwrite anything.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/early-checkout/{}/decline", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "notes": "second review" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let request = &body["data"].as_array().unwrap()[0];
    assert_eq!(request["status"], json!("approved"));
    assert_eq!(request["reviewedAt"], reviewed_at);
    assert_eq!(request["responseNotes"], json!("first review"));
}

#[actix_web::test]
async fn decline_flow() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .set_json(request_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/early-checkout/{}/decline", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "notes": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], json!("declined"));
}

#[actix_web::test]
async fn multiple_pending_requests_for_the_same_day_all_surface() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/early-checkout")
            .insert_header(bearer(&token))
            .set_json(request_payload())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn employees_cannot_review() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .set_json(request_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/early-checkout/{}/approve", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "notes": null }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn blank_reason_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let employee = ctx.seed_employee(EmployeeBuilder::on_site()).await;
    let token = ctx.token_for(&employee);
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .set_json(json!({
            "date": MONDAY,
            "reason": "   ",
            "requestedCheckoutTime": "15:30:00"
        }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn approved_request_suppresses_the_early_checkout_label() {
    let ctx = TestContext::new().await.unwrap();
    let template = ctx.seed_template(time(9, 0), time(17, 0), &WEEKDAYS).await;
    let employee = ctx
        .seed_employee(EmployeeBuilder::on_site().template(template.id))
        .await;
    let token = ctx.token_for(&employee);
    let admin = ctx.admin_token();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/attendance/records")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "employeeId": employee.id,
            "date": MONDAY,
            "inTime": "09:00:00",
            "outTime": "15:30:00",
            "status": "present"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let day_uri = format!(
        "/api/v1/attendance/records/day?employeeId={}&date={}",
        employee.id, MONDAY
    );

    let req = test::TestRequest::get()
        .uri(&day_uri)
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["labels"], json!(["early_check_out"]));
    assert_eq!(body["data"]["sanctionedEarlyCheckout"], json!(false));

    let req = test::TestRequest::post()
        .uri("/api/v1/early-checkout")
        .insert_header(bearer(&token))
        .set_json(request_payload())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/early-checkout/{}/approve", id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "notes": null }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // The label disappears from the view; the stored record is untouched.
    let req = test::TestRequest::get()
        .uri(&day_uri)
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["labels"], json!([]));
    assert_eq!(body["data"]["sanctionedEarlyCheckout"], json!(true));
    assert_eq!(body["data"]["record"]["outTime"], json!("15:30:00"));
}
