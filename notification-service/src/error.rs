use error_common::{codes, CodedError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Invalid notification request: {0}")]
    InvalidRequest(String),

    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),
}

impl CodedError for NotificationError {
    fn code(&self) -> &'static str {
        match self {
            NotificationError::InvalidRequest(_) => codes::notification::INVALID_REQUEST,
            NotificationError::DispatchFailed(_) => codes::notification::DISPATCH_FAILED,
        }
    }

    fn is_validation(&self) -> bool {
        matches!(self, NotificationError::InvalidRequest(_))
    }
}

pub type NotificationResult<T> = Result<T, NotificationError>;
