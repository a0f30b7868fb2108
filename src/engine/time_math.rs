use chrono::NaiveDateTime;

/// Hours worked between two instants, rounded to the nearest whole minute
/// before converting to hours. Ties round half-up. Rounding at the minute
/// level avoids sub-minute floating drift in payroll totals.
///
/// Either side absent means "not yet computable" and yields 0 rather than an
/// error. `end < start` is not validated; a negative duration propagates as
/// negative hours.
pub fn elapsed_hours(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> f64 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0.0;
    };

    let diff_ms = (end - start).num_milliseconds();
    let minutes = (diff_ms as f64 / 60_000.0 + 0.5).floor();
    minutes / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn absent_side_yields_zero() {
        assert_eq!(elapsed_hours(None, Some(dt(17, 0, 0))), 0.0);
        assert_eq!(elapsed_hours(Some(dt(9, 0, 0)), None), 0.0);
        assert_eq!(elapsed_hours(None, None), 0.0);
    }

    #[test]
    fn full_workday_is_exact() {
        assert_eq!(elapsed_hours(Some(dt(9, 0, 0)), Some(dt(17, 0, 0))), 8.0);
    }

    #[test]
    fn ninety_seconds_rounds_up_to_two_minutes() {
        let hours = elapsed_hours(Some(dt(9, 0, 0)), Some(dt(9, 1, 30)));
        assert!((hours - 2.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn sub_half_minute_rounds_down() {
        // 8h00m20s -> 480 minutes
        assert_eq!(elapsed_hours(Some(dt(9, 0, 0)), Some(dt(17, 0, 20))), 8.0);
    }

    #[test]
    fn negative_duration_propagates() {
        let hours = elapsed_hours(Some(dt(17, 0, 0)), Some(dt(9, 0, 0)));
        assert_eq!(hours, -8.0);
    }
}
