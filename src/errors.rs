//! Unified application error type.
//! All modules (db, core, cli, csvio) return AppError to keep the error
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
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid side: {0} (expected L/left or R/right)")]
    InvalidLaterality(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No location named '{0}'")]
    LocationNotFound(String),

    #[error("No site change entry with id {0}")]
    EntryNotFound(i64),

    // ---------------------------
    // Location management errors
    // ---------------------------
    #[error("Invalid location name: {0}")]
    InvalidLocationName(String),

    #[error("A location zone named '{0}' already exists")]
    LocationExists(String),

    #[error("'{0}' is a default zone and cannot be deleted (disable it instead)")]
    DefaultZone(String),

    // ---------------------------
    // CSV import errors
    // ---------------------------
    #[error("The file could not be read.")]
    UnreadableFile,

    #[error("The file does not appear to be a valid SiteCycle CSV export.")]
    InvalidHeader,

    #[error("No valid site change entries were found in the file.")]
    NoValidEntries,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
