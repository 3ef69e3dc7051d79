//! Error types for civil calendar handling.

use thiserror::Error;

/// Errors from civil date validation and birthday parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The Gregorian date does not exist (e.g. Feb 30).
    #[error("invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Hour outside 0..=23 or minute outside 0..=59.
    #[error("invalid time of day: {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
    /// The input string does not follow `YYYY-MM-DD[ HH:MM]`.
    #[error("parse error: {0}")]
    Parse(String),
}
