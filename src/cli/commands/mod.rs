pub mod change;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod locations;
pub mod log;

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_internet_datetime;
use chrono::{DateTime, Utc};

/// Parse an optional ISO-8601 CLI argument.
pub(crate) fn parse_optional_datetime(input: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    match input {
        Some(s) => parse_internet_datetime(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(None),
    }
}
