pub mod employee;
pub mod report;
pub mod settings;
pub mod shift;
