use chrono::{NaiveDate, NaiveTime};
use clinic_directory::{DoctorId, PatientId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{SchedulingError, SchedulingResult};

/// Visit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    CheckedIn,
    Completed,
    Cancelled,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::CheckedIn => "CheckedIn",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "NoShow",
        })
    }
}

/// A booked visit.
///
/// Patient, doctor and id never change once booked. Only the date/time
/// (through rescheduling) and the status move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub(crate) id: Uuid,
    pub(crate) patient_id: PatientId,
    pub(crate) doctor_id: DoctorId,
    pub(crate) date: NaiveDate,
    pub(crate) time: NaiveTime,
    pub(crate) visit_type: String,
    pub(crate) status: AppointmentStatus,
    pub(crate) is_walk_in: bool,
    pub(crate) notes: Option<String>,
}

impl Appointment {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn doctor_id(&self) -> &DoctorId {
        &self.doctor_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn visit_type(&self) -> &str {
        &self.visit_type
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn is_walk_in(&self) -> bool {
        self.is_walk_in
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Booking form input. Date is `YYYY-MM-DD`, time is 24-hour `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub date: String,
    pub time: String,
    pub visit_type: String,
    #[serde(default)]
    pub is_walk_in: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    pub fn new(
        patient_id: impl Into<PatientId>,
        doctor_id: impl Into<DoctorId>,
        date: impl Into<String>,
        time: impl Into<String>,
        visit_type: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            date: date.into(),
            time: time.into(),
            visit_type: visit_type.into(),
            is_walk_in: false,
            notes: None,
        }
    }

    pub fn walk_in(mut self) -> Self {
        self.is_walk_in = true;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

pub fn parse_date(value: &str) -> SchedulingResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| SchedulingError::InvalidSchedule(format!("date {value:?}: {e}")))
}

/// Only times within a single 24-hour day are accepted (`00:00`..=`23:59`).
pub fn parse_time(value: &str) -> SchedulingResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| SchedulingError::InvalidSchedule(format!("time {value:?}: {e}")))
}
