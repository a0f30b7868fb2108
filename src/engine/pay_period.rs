use chrono::{Duration, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// One 14-day reporting window. Bounds are inclusive calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PayPeriod {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub start: NaiveDate,

    #[schema(example = "2024-01-14", value_type = String, format = "date")]
    pub end: NaiveDate,
}

impl PayPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The 14-day window enclosing `today`, anchored to the configured start of
/// period zero. Periods tile contiguously in both directions: `div_euclid`
/// floors toward negative infinity, so dates before the anchor land in a
/// well-defined negative period instead of overlapping period zero.
pub fn current_period(anchor: NaiveDate, today: NaiveDate) -> PayPeriod {
    let days_since_anchor = (today - anchor).num_days();
    let period_index = days_since_anchor.div_euclid(14);
    let start = anchor + Duration::days(period_index * 14);

    PayPeriod {
        start,
        end: start + Duration::days(13),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn anchor_day_starts_period_zero() {
        let period = current_period(date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(period.start, date(2024, 1, 1));
        assert_eq!(period.end, date(2024, 1, 14));
    }

    #[test]
    fn day_fifteen_rolls_into_next_window() {
        let period = current_period(date(2024, 1, 1), date(2024, 1, 15));
        assert_eq!(period.start, date(2024, 1, 15));
        assert_eq!(period.end, date(2024, 1, 28));
    }

    #[test]
    fn last_day_of_period_zero_stays_in_it() {
        let period = current_period(date(2024, 1, 1), date(2024, 1, 14));
        assert_eq!(period.start, date(2024, 1, 1));
        assert_eq!(period.end, date(2024, 1, 14));
    }

    #[test]
    fn dates_before_anchor_land_in_negative_periods() {
        // Two weeks before the anchor: exactly period -1.
        let period = current_period(date(2024, 1, 15), date(2024, 1, 1));
        assert_eq!(period.start, date(2024, 1, 1));
        assert_eq!(period.end, date(2024, 1, 14));
    }

    #[test]
    fn windows_tile_contiguously_across_the_anchor() {
        let anchor = date(2024, 1, 15);
        let before = current_period(anchor, date(2024, 1, 14));
        let at = current_period(anchor, anchor);
        assert_eq!(before.end + Duration::days(1), at.start);
    }

    #[test]
    fn membership_is_inclusive_on_both_bounds() {
        let period = current_period(date(2024, 1, 1), date(2024, 1, 3));
        assert!(period.contains(date(2024, 1, 1)));
        assert!(period.contains(date(2024, 1, 14)));
        assert!(!period.contains(date(2023, 12, 31)));
        assert!(!period.contains(date(2024, 1, 15)));
    }
}
