use error_common::{codes, CodedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source failed: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

impl CodedError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::Source(_) => codes::configuration::SOURCE_FAILED,
            ConfigError::Validation(_) => codes::configuration::INVALID_VALUE,
        }
    }

    fn is_validation(&self) -> bool {
        matches!(self, ConfigError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
