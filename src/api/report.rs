use crate::api::settings::fetch_anchor;
use crate::auth::auth::AuthUser;
use crate::engine::aggregate::{REPORT_HEADERS, ShiftLine, aggregate, period_totals, report_rows};
use crate::engine::pay_period::{PayPeriod, current_period};
use crate::model::employee::Employee;
use crate::utils::shift_store;
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Serialize;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct TimesheetResponse {
    pub employee: Employee,
    pub lines: Vec<ShiftLine>,
    pub total_hours: f64,
    pub total_pay: f64,

    /// Present when a pay-period anchor is configured; `period_hours` and
    /// `period_pay` then cover this window. Without an anchor they fall back
    /// to the all-time totals.
    pub period: Option<PayPeriod>,
    pub period_hours: f64,
    pub period_pay: f64,
}

/// Everything a timesheet view or export needs for one employee: per-shift
/// lines, all-time totals, and the current-period summary when configured.
/// Recomputed from the full shift set on every call; nothing is cached.
async fn build_timesheet(
    pool: &MySqlPool,
    employee_id: u64,
) -> actix_web::Result<Option<TimesheetResponse>> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, name, email, hourly_rate FROM employees WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch employee for timesheet");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(employee) = employee else {
        return Ok(None);
    };

    let shifts = shift_store::list_for_employee(pool, employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to fetch shifts for timesheet");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let anchor = fetch_anchor(pool).await.map_err(|e| {
        error!(error = %e, "Failed to fetch pay period anchor");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let period = anchor.map(|a| current_period(a, Local::now().date_naive()));

    let in_period = period.map(|p| period_totals(&shifts, employee.hourly_rate, &p));
    let sheet = aggregate(shifts, employee.hourly_rate);

    let (period_hours, period_pay) = match in_period {
        Some(totals) => (totals.hours, totals.pay),
        None => (sheet.total_hours, sheet.total_pay),
    };

    Ok(Some(TimesheetResponse {
        employee,
        lines: sheet.lines,
        total_hours: sheet.total_hours,
        total_pay: sheet.total_pay,
        period,
        period_hours,
        period_pay,
    }))
}

/// Timesheet for the logged-in employee
#[utoipa::path(
    get,
    path = "/api/v1/shifts/timesheet",
    responses(
        (status = 200, description = "Own timesheet", body = TimesheetResponse),
        (status = 404, description = "Employee record not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn my_timesheet(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    match build_timesheet(pool.get_ref(), employee_id).await? {
        Some(sheet) => Ok(HttpResponse::Ok().json(sheet)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Employee record not found"
        }))),
    }
}

/// Timesheet for any employee (admin)
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/timesheet",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee timesheet", body = TimesheetResponse),
        (status = 404, description = "Employee record not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn employee_timesheet(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    match build_timesheet(pool.get_ref(), path.into_inner()).await? {
        Some(sheet) => Ok(HttpResponse::Ok().json(sheet)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Employee record not found"
        }))),
    }
}

/// CSV export of an employee's timesheet (admin)
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/timesheet/export",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv"),
        (status = 404, description = "Employee record not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Reports"
)]
pub async fn export_timesheet_csv(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let Some(sheet) = build_timesheet(pool.get_ref(), path.into_inner()).await? else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Employee record not found"
        })));
    };

    let timesheet = crate::engine::aggregate::Timesheet {
        lines: sheet.lines,
        total_hours: sheet.total_hours,
        total_pay: sheet.total_pay,
    };

    let mut wtr = csv::WriterBuilder::new().from_writer(vec![]);

    wtr.write_record(REPORT_HEADERS).map_err(|e| {
        error!(error = %e, "Failed to write CSV header");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    for row in report_rows(&timesheet) {
        wtr.write_record(row.as_record()).map_err(|e| {
            error!(error = %e, "Failed to write CSV row");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;
    }

    let data = wtr.into_inner().map_err(|e| {
        error!(error = %e, "Failed to finish CSV export");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let filename = format!("{}-shifts.csv", sheet.employee.name.replace(' ', "_"));

    Ok(HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(data))
}
