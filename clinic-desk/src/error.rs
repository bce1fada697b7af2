use billing_service::BillingError;
use clinic_directory::PatientId;
use config_engine::ConfigError;
use error_common::{codes, CodedError};
use notification_service::{Channel, NotificationError};
use scheduling_service::SchedulingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown patient: {0}")]
    UnknownPatient(PatientId),

    #[error("Patient {patient_id} has no {channel} contact")]
    MissingContact { patient_id: PatientId, channel: Channel },
}

impl CodedError for DeskError {
    fn code(&self) -> &'static str {
        match self {
            DeskError::Billing(e) => e.code(),
            DeskError::Scheduling(e) => e.code(),
            DeskError::Notification(e) => e.code(),
            DeskError::Config(e) => e.code(),
            DeskError::UnknownPatient(_) => codes::lookup::UNKNOWN_PATIENT,
            DeskError::MissingContact { .. } => codes::validation::MISSING_REQUIRED_FIELD,
        }
    }

    fn is_validation(&self) -> bool {
        match self {
            DeskError::Billing(e) => e.is_validation(),
            DeskError::Scheduling(e) => e.is_validation(),
            DeskError::Notification(e) => e.is_validation(),
            DeskError::Config(e) => e.is_validation(),
            DeskError::UnknownPatient(_) | DeskError::MissingContact { .. } => true,
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
