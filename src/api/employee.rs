use crate::{
    auth::{auth::AuthUser, password::hash_password},
    model::{employee::Employee, role::Role},
    utils::db_utils::{SqlValue, build_update_sql, execute_update},
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john@company.com", format = "email")]
    pub email: String,

    #[schema(example = 20.0)]
    pub hourly_rate: f64,

    /// Initial password for the employee's login account
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,

    #[schema(example = 22.5)]
    pub hourly_rate: Option<f64>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
}

/// Create an employee with a linked login account
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "message": "Employee created successfully"
        })),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already in use"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let name = payload.name.trim();
    let email = payload.email.trim();

    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Name, email and password must not be empty"
        })));
    }

    if payload.hourly_rate < 0.0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Hourly rate must not be negative"
        })));
    }

    let result = sqlx::query("INSERT INTO employees (name, email, hourly_rate) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(payload.hourly_rate)
        .execute(pool.get_ref())
        .await;

    let employee_id = match result {
        Ok(r) => r.last_insert_id(),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "message": "Email already in use"
                    })));
                }
            }

            error!(error = %e, "Failed to create employee");
            return Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, contact the system admin"
            })));
        }
    };

    // Login account linked to the new employee row. The two inserts are not
    // transactional; a failure here leaves the employee without a login,
    // which an admin can repair by re-creating the account.
    let hashed = hash_password(&payload.password);
    if let Err(e) = sqlx::query(
        "INSERT INTO users (username, password, role_id, employee_id) VALUES (?, ?, ?, ?)",
    )
    .bind(email)
    .bind(hashed)
    .bind(Role::Employee as u8)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    {
        error!(error = %e, employee_id, "Failed to create login for employee");
        return Ok(HttpResponse::InternalServerError().json(json!({
            "message": "Employee created but login account failed"
        })));
    }

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee created successfully",
        "employee_id": employee_id
    })))
}

/// List employees with hourly rates
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employee list", body = EmployeeListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let data = sqlx::query_as::<_, Employee>(
        "SELECT id, name, email, hourly_rate FROM employees ORDER BY name ASC",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch employee list");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse { data }))
}

/// Employee detail
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee detail", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, name, email, hourly_rate FROM employees WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Update employee fields, including the hourly rate
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    request_body = UpdateEmployee,
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let employee_id = path.into_inner();

    if let Some(rate) = body.hourly_rate {
        if rate < 0.0 {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Hourly rate must not be negative"
            })));
        }
    }

    let mut fields = Vec::new();
    if let Some(name) = &body.name {
        fields.push(("name", SqlValue::String(name.clone())));
    }
    if let Some(email) = &body.email {
        fields.push(("email", SqlValue::String(email.clone())));
    }
    if let Some(rate) = body.hourly_rate {
        fields.push(("hourly_rate", SqlValue::F64(rate)));
    }

    let update = build_update_sql("employees", fields, "id", employee_id)?;

    let rows = execute_update(pool.get_ref(), update).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to update employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if rows == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully"
    })))
}
