use std::net::IpAddr;

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Claims;
use crate::database::models::{AdminAttendanceUpsert, AttendanceRecord, Employee};
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{
    AttendanceService, EarlyCheckoutService, LocationDecision, LocationGate, ResolvedSchedule,
    ScheduleResolver, TimingLabel, timing,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayQuery {
    pub date: Option<NaiveDate>,
    pub employee_id: Option<Uuid>,
}

/// Attendance day view: the raw record plus everything derived for
/// display. Labels are post-suppression; the record itself is untouched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub record: Option<AttendanceRecord>,
    pub schedule: Option<ResolvedSchedule>,
    pub labels: Vec<TimingLabel>,
    pub sanctioned_early_checkout: bool,
}

/// Caller's network origin: first hop of X-Forwarded-For when present,
/// otherwise the peer address. A header that is present but unparseable
/// yields None, which the gate treats as unknown (fail-closed).
fn client_origin(req: &HttpRequest) -> Option<IpAddr> {
    if let Some(forwarded) = req.headers().get("X-Forwarded-For") {
        return forwarded
            .to_str()
            .ok()
            .and_then(|value| value.split(',').next())
            .and_then(|first| first.trim().parse().ok());
    }

    req.peer_addr().map(|addr| addr.ip())
}

async fn load_employee(
    employees: &EmployeeRepository,
    employee_id: Uuid,
) -> Result<Employee, AppError> {
    employees
        .get_by_id(employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee".to_string()))
}

async fn ensure_location_authorized(
    gate: &LocationGate,
    employee: &Employee,
    origin: Option<IpAddr>,
) -> Result<(), AppError> {
    match gate.evaluate_for(employee, origin).await? {
        LocationDecision::Authorized => Ok(()),
        LocationDecision::Denied => Err(AppError::LocationDenied),
        LocationDecision::Unknown => Err(AppError::LocationUnknown),
    }
}

fn now_local() -> (NaiveDate, NaiveTime) {
    let now = Local::now().naive_local();
    (now.date(), now.time())
}

pub async fn check_in(
    claims: Claims,
    req: HttpRequest,
    employees: web::Data<EmployeeRepository>,
    gate: web::Data<LocationGate>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&employees, claims.employee_id()).await?;
    ensure_location_authorized(&gate, &employee, client_origin(&req)).await?;

    let (date, time) = now_local();
    let record = attendance.check_in(employee.id, date, time).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(record),
        "Checked in successfully",
    )))
}

pub async fn check_out(
    claims: Claims,
    req: HttpRequest,
    employees: web::Data<EmployeeRepository>,
    gate: web::Data<LocationGate>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&employees, claims.employee_id()).await?;
    ensure_location_authorized(&gate, &employee, client_origin(&req)).await?;

    let (date, time) = now_local();
    let record = attendance.check_out(employee.id, date, time).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        Some(record),
        "Checked out successfully",
    )))
}

pub async fn start_break(
    claims: Claims,
    req: HttpRequest,
    employees: web::Data<EmployeeRepository>,
    gate: web::Data<LocationGate>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&employees, claims.employee_id()).await?;
    ensure_location_authorized(&gate, &employee, client_origin(&req)).await?;

    let (date, time) = now_local();
    let record = attendance.start_break(employee.id, date, time).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

pub async fn end_break(
    claims: Claims,
    req: HttpRequest,
    employees: web::Data<EmployeeRepository>,
    gate: web::Data<LocationGate>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&employees, claims.employee_id()).await?;
    ensure_location_authorized(&gate, &employee, client_origin(&req)).await?;

    let (date, time) = now_local();
    let record = attendance.end_break(employee.id, date, time).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatus {
    pub decision: LocationDecision,
}

/// Negative gate results are not errors; the UI uses this to disable the
/// check-in controls with an explanation.
pub async fn location_status(
    claims: Claims,
    req: HttpRequest,
    employees: web::Data<EmployeeRepository>,
    gate: web::Data<LocationGate>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&employees, claims.employee_id()).await?;
    let decision = gate.evaluate_for(&employee, client_origin(&req)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(LocationStatus { decision })))
}

async fn build_day_view(
    employee: &Employee,
    date: NaiveDate,
    resolver: &ScheduleResolver,
    attendance: &AttendanceService,
    early_checkout: &EarlyCheckoutService,
) -> Result<DayView, AppError> {
    let record = attendance.get_for_date(employee.id, date).await?;
    let schedule = resolver.resolve_for(employee, date).await?;
    let sanctioned = early_checkout
        .has_approved_for_date(employee.id, date)
        .await?;

    let mut labels = match &record {
        Some(record) => timing::classify(record, &schedule),
        None => Vec::new(),
    };

    // Display-time join: an approved early-checkout request supersedes
    // the label while the raw classification stays an audit signal.
    if sanctioned {
        labels.retain(|label| *label != TimingLabel::EarlyCheckOut);
    }

    Ok(DayView {
        date,
        record,
        schedule: if schedule.is_empty() {
            None
        } else {
            Some(schedule)
        },
        labels,
        sanctioned_early_checkout: sanctioned,
    })
}

pub async fn my_day(
    claims: Claims,
    query: web::Query<DayQuery>,
    employees: web::Data<EmployeeRepository>,
    resolver: web::Data<ScheduleResolver>,
    attendance: web::Data<AttendanceService>,
    early_checkout: web::Data<EarlyCheckoutService>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(&employees, claims.employee_id()).await?;
    let date = query.date.unwrap_or_else(|| now_local().0);

    let view = build_day_view(&employee, date, &resolver, &attendance, &early_checkout).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn resolved_schedule(
    claims: Claims,
    query: web::Query<DayQuery>,
    employees: web::Data<EmployeeRepository>,
    resolver: web::Data<ScheduleResolver>,
) -> Result<HttpResponse, AppError> {
    let employee_id = query.employee_id.unwrap_or_else(|| claims.employee_id());
    if employee_id != claims.employee_id() && !claims.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot view other employees' schedules".to_string(),
        ));
    }

    let employee = load_employee(&employees, employee_id).await?;
    let date = query.date.unwrap_or_else(|| now_local().0);
    let schedule = resolver.resolve_for(&employee, date).await?;

    // Absence of a schedule is a normal outcome, not a failure.
    let body = if schedule.is_empty() {
        None
    } else {
        Some(schedule)
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(body)))
}

/// Admin review of one employee's day.
pub async fn employee_day(
    claims: Claims,
    query: web::Query<DayQuery>,
    employees: web::Data<EmployeeRepository>,
    resolver: web::Data<ScheduleResolver>,
    attendance: web::Data<AttendanceService>,
    early_checkout: web::Data<EarlyCheckoutService>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Administrators only".to_string()));
    }

    let employee_id = query
        .employee_id
        .ok_or_else(|| AppError::BadRequest("employeeId is required".to_string()))?;
    let employee = load_employee(&employees, employee_id).await?;
    let date = query.date.unwrap_or_else(|| now_local().0);

    let view = build_day_view(&employee, date, &resolver, &attendance, &early_checkout).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

pub async fn list_records(
    claims: Claims,
    query: web::Query<DayQuery>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Administrators only".to_string()));
    }

    let date = query.date.unwrap_or_else(|| now_local().0);
    let records = attendance.get_all_for_date(date).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
}

/// Manual correction. Bypasses the location gate entirely.
pub async fn correct_record(
    claims: Claims,
    input: web::Json<AdminAttendanceUpsert>,
    attendance: web::Data<AttendanceService>,
) -> Result<HttpResponse, AppError> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden("Administrators only".to_string()));
    }

    let record = attendance.admin_correct(input.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}
