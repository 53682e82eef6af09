use thiserror::Error;

use crate::data::LookupError;
use crate::email::EmailError;
use crate::telemetry::TelemetryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Email generation failed: {0}")]
    Email(#[from] EmailError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::from(LookupError::CourseNotFound("CS101".to_string()));
        assert_eq!(err.to_string(), "Lookup failed: Course not found: CS101");

        let err = AppError::from(url::Url::parse("not a url").unwrap_err());
        assert!(err.to_string().starts_with("Invalid base URL"));
    }
}
