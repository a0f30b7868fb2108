use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee's punch record for a single calendar date. At most one shift
/// exists per (employee, date); `time_out` absent means the shift is still
/// open. The adjusted columns are administrator overrides and may be set or
/// cleared independently of the open/closed state.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Shift {
    pub id: u64,
    pub employee_id: u64,

    #[schema(example = "2024-01-08", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2024-01-08T09:00:00", value_type = String)]
    pub time_in: NaiveDateTime,

    #[schema(example = "2024-01-08T17:00:00", value_type = Option<String>, nullable = true)]
    pub time_out: Option<NaiveDateTime>,

    #[schema(value_type = Option<String>, nullable = true)]
    pub adj_time_in: Option<NaiveDateTime>,

    #[schema(value_type = Option<String>, nullable = true)]
    pub adj_time_out: Option<NaiveDateTime>,
}

impl Shift {
    /// Adjusted punch-in if present, else the raw punch-in.
    pub fn effective_start(&self) -> Option<NaiveDateTime> {
        self.adj_time_in.or(Some(self.time_in))
    }

    /// Adjusted punch-out if present, else the raw punch-out (which may be
    /// absent while the shift is open).
    pub fn effective_end(&self) -> Option<NaiveDateTime> {
        self.adj_time_out.or(self.time_out)
    }
}
