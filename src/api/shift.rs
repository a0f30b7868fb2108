use crate::auth::auth::AuthUser;
use crate::engine::lifecycle::{self, ShiftState};
use crate::model::shift::Shift;
use crate::utils::db_utils::{SqlValue, build_update_sql, execute_update};
use crate::utils::shift_store;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use sqlx::MySqlPool;
use utoipa::ToSchema;

/// Punch-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/shifts/punch-in",
    responses(
        (status = 200, description = "Punched in successfully", body = Object, example = json!({
            "message": "Punched in successfully"
        })),
        (status = 400, description = "Already punched in/out today", body = Object, example = json!({
            "message": "Already punched in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Shifts"
)]
pub async fn punch_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let now = Local::now().naive_local();
    let today = now.date();

    // One shift per employee per day, enforced by lookup-before-create.
    let existing = shift_store::find_for_day(pool.get_ref(), employee_id, today)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Punch-in lookup failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if let Err(rejected) = lifecycle::check_punch_in(existing.as_ref()) {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": rejected.message()
        })));
    }

    let shift_id = shift_store::create(pool.get_ref(), employee_id, today, now)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Punch-in failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Punched in successfully",
        "shift_id": shift_id
    })))
}

/// Punch-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/shifts/punch-out",
    responses(
        (status = 200, description = "Punched out successfully", body = Object, example = json!({
            "message": "Punched out successfully"
        })),
        (status = 400, description = "No open shift for today", body = Object, example = json!({
            "message": "No open shift for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Shifts"
)]
pub async fn punch_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let now = Local::now().naive_local();
    let today = now.date();

    let existing = shift_store::find_for_day(pool.get_ref(), employee_id, today)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Punch-out lookup failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let shift = match lifecycle::check_punch_out(existing.as_ref()) {
        Ok(shift) => shift,
        Err(rejected) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": rejected.message()
            })));
        }
    };

    let rows = shift_store::close(pool.get_ref(), shift.id, now)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Punch-out failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // Lost the race against another punch-out for the same shift
    if rows == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Already punched out today"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Punched out successfully"
    })))
}

#[derive(serde::Serialize, ToSchema)]
pub struct PunchStatusResponse {
    /// "none", "open" or "closed"
    #[schema(example = "open", value_type = String)]
    pub state: &'static str,
    pub shift: Option<Shift>,
}

/// Today's punch status for the logged-in employee
#[utoipa::path(
    get,
    path = "/api/v1/shifts/today",
    responses(
        (status = 200, description = "Punch status for today", body = PunchStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Shifts"
)]
pub async fn punch_status(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let today = Local::now().date_naive();
    let shift = shift_store::find_for_day(pool.get_ref(), employee_id, today)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Punch status lookup failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let state = match lifecycle::state_of(shift.as_ref()) {
        ShiftState::NoShiftToday => "none",
        ShiftState::Open => "open",
        ShiftState::Closed => "closed",
    };

    Ok(HttpResponse::Ok().json(PunchStatusResponse { state, shift }))
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Field absent = leave unchanged, explicit null = clear, value = set.
#[derive(Deserialize, ToSchema)]
pub struct AdjustShift {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(example = "2024-01-08T09:30:00", value_type = Option<String>, nullable = true)]
    pub adj_time_in: Option<Option<NaiveDateTime>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(example = "2024-01-08T17:30:00", value_type = Option<String>, nullable = true)]
    pub adj_time_out: Option<Option<NaiveDateTime>>,
}

/// Administrator time adjustment. Works on open and closed shifts alike and
/// never flips the open/closed state; the raw punches stay untouched.
#[utoipa::path(
    put,
    path = "/api/v1/shifts/{shift_id}/adjustments",
    request_body = AdjustShift,
    params(
        ("shift_id", description = "Shift ID")
    ),
    responses(
        (status = 200, description = "Adjustments updated"),
        (status = 400, description = "No fields provided for update"),
        (status = 404, description = "Shift not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Shifts"
)]
pub async fn adjust_shift(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<AdjustShift>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let shift_id = path.into_inner();

    let existing = shift_store::find_by_id(pool.get_ref(), shift_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, shift_id, "Adjustment lookup failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let shift = match lifecycle::check_adjust(existing.as_ref()) {
        Ok(shift) => shift,
        Err(_) => {
            return Ok(HttpResponse::NotFound().json(serde_json::json!({
                "message": "Shift not found"
            })));
        }
    };

    let mut fields = Vec::new();
    if let Some(value) = body.adj_time_in {
        fields.push((
            "adj_time_in",
            value.map_or(SqlValue::Null, SqlValue::DateTime),
        ));
    }
    if let Some(value) = body.adj_time_out {
        fields.push((
            "adj_time_out",
            value.map_or(SqlValue::Null, SqlValue::DateTime),
        ));
    }

    let update = build_update_sql("shifts", fields, "id", shift.id)?;

    execute_update(pool.get_ref(), update).await.map_err(|e| {
        tracing::error!(error = %e, shift_id, "Adjustment update failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Adjustments updated successfully"
    })))
}
