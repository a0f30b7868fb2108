use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::engine::pay_period::PayPeriod;
use crate::engine::time_math::elapsed_hours;
use crate::model::shift::Shift;

#[derive(Debug, Serialize, ToSchema)]
pub struct ShiftLine {
    pub shift: Shift,
    pub hours: f64,
    pub pay: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Timesheet {
    pub lines: Vec<ShiftLine>,
    pub total_hours: f64,
    pub total_pay: f64,
}

/// Folds an employee's shifts into per-shift hours/pay plus all-time totals.
/// Adjusted timestamps take precedence over raw punches; a shift that cannot
/// yet produce hours (open and unadjusted) contributes 0 to both sums. Lines
/// come back sorted ascending by date for display.
pub fn aggregate(mut shifts: Vec<Shift>, hourly_rate: f64) -> Timesheet {
    shifts.sort_by(|a, b| a.date.cmp(&b.date));

    let mut total_hours = 0.0;
    let mut total_pay = 0.0;

    let lines = shifts
        .into_iter()
        .map(|shift| {
            let hours = elapsed_hours(shift.effective_start(), shift.effective_end());
            let pay = hours * hourly_rate;
            total_hours += hours;
            total_pay += pay;
            ShiftLine { shift, hours, pay }
        })
        .collect();

    Timesheet {
        lines,
        total_hours,
        total_pay,
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct PeriodTotals {
    pub hours: f64,
    pub pay: f64,
}

/// Same per-shift computation, restricted to shifts whose calendar date falls
/// inside the period (both bounds inclusive).
pub fn period_totals(shifts: &[Shift], hourly_rate: f64, period: &PayPeriod) -> PeriodTotals {
    let mut totals = PeriodTotals {
        hours: 0.0,
        pay: 0.0,
    };

    for shift in shifts.iter().filter(|s| period.contains(s.date)) {
        let hours = elapsed_hours(shift.effective_start(), shift.effective_end());
        totals.hours += hours;
        totals.pay += hours * hourly_rate;
    }

    totals
}

pub const REPORT_HEADERS: [&str; 8] = [
    "Date", "Day", "Time In", "Adj. In", "Time Out", "Adj. Out", "Hours", "Pay",
];

/// One rendered row of the timesheet export. The trailing totals row carries
/// "Totals" in the date column and empty time columns.
#[derive(Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub day: String,
    pub time_in: String,
    pub adj_in: String,
    pub time_out: String,
    pub adj_out: String,
    pub hours: String,
    pub pay: String,
}

impl ReportRow {
    pub fn as_record(&self) -> [&str; 8] {
        [
            &self.date,
            &self.day,
            &self.time_in,
            &self.adj_in,
            &self.time_out,
            &self.adj_out,
            &self.hours,
            &self.pay,
        ]
    }
}

fn format_time(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// The exact row set any tabular exporter renders: one row per shift in date
/// order, then the totals row.
pub fn report_rows(timesheet: &Timesheet) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = timesheet
        .lines
        .iter()
        .map(|line| {
            let shift = &line.shift;
            ReportRow {
                date: shift.date.to_string(),
                day: shift.date.format("%a").to_string(),
                time_in: format_time(Some(shift.time_in)),
                adj_in: format_time(shift.adj_time_in),
                time_out: format_time(shift.time_out),
                adj_out: format_time(shift.adj_time_out),
                hours: format!("{:.2}", line.hours),
                pay: format!("{:.2}", line.pay),
            }
        })
        .collect();

    rows.push(ReportRow {
        date: "Totals".to_string(),
        day: String::new(),
        time_in: String::new(),
        adj_in: String::new(),
        time_out: String::new(),
        adj_out: String::new(),
        hours: format!("{:.2}", timesheet.total_hours),
        pay: format!("{:.2}", timesheet.total_pay),
    });

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pay_period::current_period;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn shift(id: u64, d: u32, out_hour: Option<u32>) -> Shift {
        Shift {
            id,
            employee_id: 7,
            date: date(d),
            time_in: date(d).and_hms_opt(9, 0, 0).unwrap(),
            time_out: out_hour.map(|h| date(d).and_hms_opt(h, 0, 0).unwrap()),
            adj_time_in: None,
            adj_time_out: None,
        }
    }

    #[test]
    fn empty_input_yields_zero_totals() {
        let sheet = aggregate(Vec::new(), 20.0);
        assert!(sheet.lines.is_empty());
        assert_eq!(sheet.total_hours, 0.0);
        assert_eq!(sheet.total_pay, 0.0);
    }

    #[test]
    fn clean_eight_hour_day_at_twenty_per_hour() {
        let sheet = aggregate(vec![shift(1, 8, Some(17))], 20.0);
        assert_eq!(sheet.lines[0].hours, 8.0);
        assert_eq!(sheet.lines[0].pay, 160.0);
        assert_eq!(sheet.total_hours, 8.0);
        assert_eq!(sheet.total_pay, 160.0);
    }

    #[test]
    fn adjusted_punch_in_overrides_raw() {
        let mut s = shift(1, 8, Some(17));
        s.adj_time_in = Some(date(8).and_hms_opt(9, 30, 0).unwrap());
        let sheet = aggregate(vec![s], 10.0);
        assert_eq!(sheet.lines[0].hours, 7.5);
        assert_eq!(sheet.lines[0].pay, 75.0);
    }

    #[test]
    fn open_unadjusted_shift_contributes_nothing() {
        let sheet = aggregate(vec![shift(1, 8, None), shift(2, 9, Some(17))], 20.0);
        assert_eq!(sheet.lines[0].hours, 0.0);
        assert_eq!(sheet.total_hours, 8.0);
        assert_eq!(sheet.total_pay, 160.0);
    }

    #[test]
    fn adjusted_punch_out_closes_an_open_shift_for_pay() {
        let mut s = shift(1, 8, None);
        s.adj_time_out = Some(date(8).and_hms_opt(13, 0, 0).unwrap());
        let sheet = aggregate(vec![s], 20.0);
        assert_eq!(sheet.lines[0].hours, 4.0);
    }

    #[test]
    fn lines_come_back_in_date_order() {
        let sheet = aggregate(
            vec![shift(1, 20, Some(17)), shift(2, 3, Some(17)), shift(3, 11, Some(17))],
            20.0,
        );
        let dates: Vec<_> = sheet.lines.iter().map(|l| l.shift.date).collect();
        assert_eq!(dates, vec![date(3), date(11), date(20)]);
    }

    #[test]
    fn period_totals_filter_inclusively_by_date() {
        // Period anchored 2024-01-01 and queried on 2024-01-10: [01, 14].
        let period = current_period(date(1), date(10));
        let shifts = vec![
            shift(1, 1, Some(17)),  // first day, in
            shift(2, 14, Some(17)), // last day, in
            shift(3, 15, Some(17)), // next period, out
        ];
        let totals = period_totals(&shifts, 20.0, &period);
        assert_eq!(totals.hours, 16.0);
        assert_eq!(totals.pay, 320.0);
    }

    #[test]
    fn report_ends_with_totals_row_with_empty_time_columns() {
        let sheet = aggregate(vec![shift(1, 8, Some(17))], 20.0);
        let rows = report_rows(&sheet);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].date, "2024-01-08");
        assert_eq!(rows[0].day, "Mon");
        assert_eq!(rows[0].time_in, "09:00");
        assert_eq!(rows[0].adj_in, "");
        assert_eq!(rows[0].time_out, "17:00");
        assert_eq!(rows[0].hours, "8.00");
        assert_eq!(rows[0].pay, "160.00");

        let totals = &rows[1];
        assert_eq!(totals.date, "Totals");
        assert_eq!(totals.time_in, "");
        assert_eq!(totals.adj_out, "");
        assert_eq!(totals.hours, "8.00");
        assert_eq!(totals.pay, "160.00");
    }
}
