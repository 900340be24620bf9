pub mod absence;
pub mod config;
pub mod db;
pub mod init;
pub mod lifecycle;
pub mod log;
pub mod report;
pub mod segment;
pub mod user;
