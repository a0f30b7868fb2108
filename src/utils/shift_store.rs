//! sqlx access to the `shifts` table. Timestamps come back normalized to
//! `chrono` values here so the rest of the code deals in one representation.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::MySqlPool;

use crate::model::shift::Shift;

const SHIFT_COLUMNS: &str = "id, employee_id, date, time_in, time_out, adj_time_in, adj_time_out";

/// The shift for one (employee, date), if any. Uniqueness of that pair is
/// enforced by callers checking this before creating; the store itself has no
/// atomic create-if-absent.
pub async fn find_for_day(
    pool: &MySqlPool,
    employee_id: u64,
    date: NaiveDate,
) -> Result<Option<Shift>, sqlx::Error> {
    sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts WHERE employee_id = ? AND date = ?"
    ))
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &MySqlPool, id: u64) -> Result<Option<Shift>, sqlx::Error> {
    sqlx::query_as::<_, Shift>(&format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All shifts for an employee, oldest first.
pub async fn list_for_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Vec<Shift>, sqlx::Error> {
    sqlx::query_as::<_, Shift>(&format!(
        "SELECT {SHIFT_COLUMNS} FROM shifts WHERE employee_id = ? ORDER BY date ASC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await
}

/// Punch-in: a fresh open shift. Returns the new row id.
pub async fn create(
    pool: &MySqlPool,
    employee_id: u64,
    date: NaiveDate,
    time_in: NaiveDateTime,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO shifts (employee_id, date, time_in) VALUES (?, ?, ?)")
        .bind(employee_id)
        .bind(date)
        .bind(time_in)
        .execute(pool)
        .await?;

    Ok(result.last_insert_id())
}

/// Punch-out: closes the shift. The `time_out IS NULL` guard keeps a repeated
/// punch-out from overwriting the recorded time; 0 rows affected means the
/// shift was already closed.
pub async fn close(
    pool: &MySqlPool,
    id: u64,
    time_out: NaiveDateTime,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE shifts SET time_out = ? WHERE id = ? AND time_out IS NULL")
        .bind(time_out)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
