//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid absence kind: {0}")]
    InvalidAbsenceKind(String),

    #[error("Unknown time zone: {0}")]
    InvalidTimezone(String),

    // ---------------------------
    // Lifecycle errors
    // ---------------------------
    #[error("A work segment is already running")]
    AlreadyActive,

    #[error("No work segment is currently running")]
    NoActiveSegment,

    #[error("{0} {1} not found")]
    NotFound(&'static str, i64),

    #[error("Segment {0} belongs to another user")]
    Forbidden(i64),

    #[error("Segment {0} is an auto cut-off marker and cannot be changed")]
    MarkerImmutable(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
