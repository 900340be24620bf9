pub mod report;
pub mod vacation;
pub mod worked;
