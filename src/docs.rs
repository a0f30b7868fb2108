use crate::api::employee::{CreateEmployee, EmployeeListResponse, UpdateEmployee};
use crate::api::report::TimesheetResponse;
use crate::api::settings::{PayPeriodSettings, UpdatePayPeriod};
use crate::api::shift::{AdjustShift, PunchStatusResponse};
use crate::engine::aggregate::{PeriodTotals, ShiftLine, Timesheet};
use crate::engine::pay_period::PayPeriod;
use crate::model::employee::Employee;
use crate::model::shift::Shift;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Punch Clock API",
        version = "1.0.0",
        description = r#"
## Employee Time Tracking

This API powers an employee time-tracking system: employees punch in and out
once per workday, administrators manage employee records and hourly rates, and
the system computes worked hours and pay within recurring biweekly pay periods.

### Key Features
- **Punching**
  - Punch in/out, one shift per employee per day, with today's status
- **Administrator Adjustments**
  - Override punch times independently of the raw record, on open or closed shifts
- **Pay Periods**
  - A global anchor date defines recurring 14-day reporting windows
- **Timesheets**
  - Per-shift hours and pay, period and all-time totals, CSV export

### Security
Endpoints are protected using **JWT Bearer authentication**. Employee
management, adjustments and exports require the **Admin** role.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::shift::punch_in,
        crate::api::shift::punch_out,
        crate::api::shift::punch_status,
        crate::api::shift::adjust_shift,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,

        crate::api::settings::get_pay_period,
        crate::api::settings::set_pay_period,

        crate::api::report::my_timesheet,
        crate::api::report::employee_timesheet,
        crate::api::report::export_timesheet_csv
    ),
    components(
        schemas(
            Shift,
            Employee,
            PayPeriod,
            ShiftLine,
            Timesheet,
            PeriodTotals,
            PunchStatusResponse,
            AdjustShift,
            CreateEmployee,
            UpdateEmployee,
            EmployeeListResponse,
            PayPeriodSettings,
            UpdatePayPeriod,
            TimesheetResponse
        )
    ),
    tags(
        (name = "Shifts", description = "Punch in/out and adjustment APIs"),
        (name = "Employees", description = "Employee management APIs"),
        (name = "Settings", description = "Pay period configuration APIs"),
        (name = "Reports", description = "Timesheet and export APIs"),
    )
)]
pub struct ApiDoc;
