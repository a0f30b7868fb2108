use std::fmt;

use crate::model::shift::Shift;

/// Where a given (employee, date) stands in the punch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftState {
    NoShiftToday,
    Open,
    Closed,
}

pub fn state_of(shift: Option<&Shift>) -> ShiftState {
    match shift {
        None => ShiftState::NoShiftToday,
        Some(s) if s.time_out.is_none() => ShiftState::Open,
        Some(_) => ShiftState::Closed,
    }
}

/// Rejected punch transition. Surfaced to the caller as-is; the user must
/// reload state rather than retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PunchError {
    AlreadyPunchedIn,
    AlreadyPunchedOut,
    NotPunchedIn,
}

impl PunchError {
    pub fn message(&self) -> &'static str {
        match self {
            PunchError::AlreadyPunchedIn => "Already punched in today",
            PunchError::AlreadyPunchedOut => "Already punched out today",
            PunchError::NotPunchedIn => "No open shift for today",
        }
    }
}

impl fmt::Display for PunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PunchError {}

/// Punch-in is allowed only when no shift exists yet for the day.
pub fn check_punch_in(existing: Option<&Shift>) -> Result<(), PunchError> {
    match state_of(existing) {
        ShiftState::NoShiftToday => Ok(()),
        ShiftState::Open => Err(PunchError::AlreadyPunchedIn),
        ShiftState::Closed => Err(PunchError::AlreadyPunchedOut),
    }
}

/// Punch-out is allowed only on an open shift; returns the shift to close.
pub fn check_punch_out(existing: Option<&Shift>) -> Result<&Shift, PunchError> {
    match existing {
        None => Err(PunchError::NotPunchedIn),
        Some(shift) if shift.time_out.is_some() => Err(PunchError::AlreadyPunchedOut),
        Some(shift) => Ok(shift),
    }
}

/// Adjustments are administrator-only and valid on both open and closed
/// shifts; they never change the open/closed state. Only a missing record is
/// rejected.
pub fn check_adjust(existing: Option<&Shift>) -> Result<&Shift, PunchError> {
    existing.ok_or(PunchError::NotPunchedIn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn shift(closed: bool) -> Shift {
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        Shift {
            id: 1,
            employee_id: 7,
            date,
            time_in: date.and_hms_opt(9, 0, 0).unwrap(),
            time_out: closed.then(|| date.and_hms_opt(17, 0, 0).unwrap()),
            adj_time_in: None,
            adj_time_out: None,
        }
    }

    #[test]
    fn state_follows_time_out() {
        assert_eq!(state_of(None), ShiftState::NoShiftToday);
        assert_eq!(state_of(Some(&shift(false))), ShiftState::Open);
        assert_eq!(state_of(Some(&shift(true))), ShiftState::Closed);
    }

    #[test]
    fn punch_in_requires_no_existing_shift() {
        assert!(check_punch_in(None).is_ok());
        assert_eq!(
            check_punch_in(Some(&shift(false))),
            Err(PunchError::AlreadyPunchedIn)
        );
        assert_eq!(
            check_punch_in(Some(&shift(true))),
            Err(PunchError::AlreadyPunchedOut)
        );
    }

    #[test]
    fn punch_out_requires_an_open_shift() {
        assert_eq!(
            check_punch_out(None).unwrap_err(),
            PunchError::NotPunchedIn
        );
        assert_eq!(
            check_punch_out(Some(&shift(true))).unwrap_err(),
            PunchError::AlreadyPunchedOut
        );
        assert!(check_punch_out(Some(&shift(false))).is_ok());
    }

    #[test]
    fn adjust_is_allowed_in_either_state() {
        assert!(check_adjust(Some(&shift(false))).is_ok());
        assert!(check_adjust(Some(&shift(true))).is_ok());
        assert_eq!(check_adjust(None).unwrap_err(), PunchError::NotPunchedIn);
    }
}
