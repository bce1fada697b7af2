use error_common::{codes, CodedError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(Uuid),

    #[error("Follow-up not found: {0}")]
    FollowUpNotFound(Uuid),

    #[error("Queue token not found: {0}")]
    QueueEntryNotFound(String),
}

impl SchedulingError {
    pub(crate) fn transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        SchedulingError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl CodedError for SchedulingError {
    fn code(&self) -> &'static str {
        match self {
            SchedulingError::InvalidTransition { .. } => codes::scheduling::INVALID_TRANSITION,
            SchedulingError::InvalidSchedule(_) => codes::scheduling::INVALID_SCHEDULE,
            SchedulingError::AppointmentNotFound(_)
            | SchedulingError::FollowUpNotFound(_)
            | SchedulingError::QueueEntryNotFound(_) => codes::lookup::NOT_FOUND,
        }
    }

    fn is_validation(&self) -> bool {
        matches!(
            self,
            SchedulingError::InvalidTransition { .. } | SchedulingError::InvalidSchedule(_)
        )
    }
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
