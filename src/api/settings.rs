use crate::auth::auth::AuthUser;
use crate::engine::pay_period::{PayPeriod, current_period};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::ToSchema;

/// The configured anchor date (start of period zero), if any. Read once per
/// request and passed down; nothing caches it, so an admin change takes
/// effect on the next read and retroactively reclassifies all history.
pub async fn fetch_anchor(pool: &MySqlPool) -> Result<Option<NaiveDate>, sqlx::Error> {
    let row = sqlx::query_scalar::<_, Option<NaiveDate>>(
        "SELECT pay_period_start FROM settings WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.flatten())
}

#[derive(Serialize, ToSchema)]
pub struct PayPeriodSettings {
    #[schema(example = "2024-01-01", value_type = Option<String>, format = "date", nullable = true)]
    pub pay_period_start: Option<NaiveDate>,

    /// The window enclosing today, when an anchor is configured.
    pub current_period: Option<PayPeriod>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePayPeriod {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub pay_period_start: NaiveDate,
}

/// Current pay-period configuration
#[utoipa::path(
    get,
    path = "/api/v1/settings/pay-period",
    responses(
        (status = 200, description = "Pay period settings", body = PayPeriodSettings),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Settings"
)]
pub async fn get_pay_period(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let anchor = fetch_anchor(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch pay period settings");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let today = Local::now().date_naive();

    Ok(HttpResponse::Ok().json(PayPeriodSettings {
        pay_period_start: anchor,
        current_period: anchor.map(|a| current_period(a, today)),
    }))
}

/// Set the pay-period anchor date
#[utoipa::path(
    put,
    path = "/api/v1/settings/pay-period",
    request_body = UpdatePayPeriod,
    responses(
        (status = 200, description = "Pay period start date saved"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Settings"
)]
pub async fn set_pay_period(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    body: web::Json<UpdatePayPeriod>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    sqlx::query(
        r#"
        INSERT INTO settings (id, pay_period_start)
        VALUES (1, ?)
        ON DUPLICATE KEY UPDATE pay_period_start = VALUES(pay_period_start)
        "#,
    )
    .bind(body.pay_period_start)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to save pay period start date");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Pay period start date saved"
    })))
}
