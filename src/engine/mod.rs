pub mod aggregate;
pub mod lifecycle;
pub mod pay_period;
pub mod time_math;
