pub mod absence;
pub mod report;
pub mod segment;
pub mod user;
