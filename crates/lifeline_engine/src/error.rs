//! Error types for the life-series engine.

use std::path::PathBuf;

use lifeline_ganzhi::CalendarError;
use lifeline_time::TimeError;
use thiserror::Error;

/// Errors while loading or validating scoring weights.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read weights file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse weights TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// A weight is non-finite or not strictly positive.
    #[error("invalid weight {key} = {value}: weights must be finite and positive")]
    Invalid { key: &'static str, value: f64 },
}

/// Errors from life-series generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Malformed or non-existent birthday.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] TimeError),
    /// The calendar could not produce pillars for a required instant.
    #[error("calendar failure: {0}")]
    Calendar(CalendarError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<CalendarError> for EngineError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::Time(t) => Self::InvalidInput(t),
            other => Self::Calendar(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_time_errors_become_invalid_input() {
        let err: EngineError = CalendarError::Time(TimeError::InvalidTime {
            hour: 24,
            minute: 0,
        })
        .into();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn other_calendar_errors_are_kept() {
        let err: EngineError = CalendarError::NoConvergence("jie").into();
        assert!(matches!(err, EngineError::Calendar(_)));
        assert!(err.to_string().contains("jie"));
    }
}
