use chrono::{NaiveDate, NaiveDateTime};
use clinic_directory::{DoctorId, PatientId};
use serde::Serialize;
use std::fmt;
use tracing::info;
use uuid::Uuid;

use crate::error::{SchedulingError, SchedulingResult};
use crate::models::Appointment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    WithDoctor,
    Completed,
    Cancelled,
}

impl QueueStatus {
    /// Still occupying a place in the waiting room.
    pub fn is_open(self) -> bool {
        matches!(self, QueueStatus::Waiting | QueueStatus::WithDoctor)
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueueStatus::Waiting => "Waiting",
            QueueStatus::WithDoctor => "WithDoctor",
            QueueStatus::Completed => "Completed",
            QueueStatus::Cancelled => "Cancelled",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueEntry {
    pub token: String,
    pub appointment_id: Uuid,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub date: NaiveDate,
    pub checked_in_at: NaiveDateTime,
    pub status: QueueStatus,
}

/// Arrival-ordered waiting room. Tokens restart at `T01` each day.
#[derive(Debug, Clone, Default)]
pub struct CheckInQueue {
    entries: Vec<QueueEntry>,
}

impl CheckInQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token for the appointment's day. Enqueuing the same
    /// appointment twice returns the existing entry.
    pub fn enqueue(&mut self, appointment: &Appointment, at: NaiveDateTime) -> QueueEntry {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.appointment_id == appointment.id())
        {
            return existing.clone();
        }

        let issued = self
            .entries
            .iter()
            .filter(|e| e.date == appointment.date())
            .count();
        let entry = QueueEntry {
            token: format!("T{:02}", issued + 1),
            appointment_id: appointment.id(),
            patient_id: appointment.patient_id().clone(),
            doctor_id: appointment.doctor_id().clone(),
            date: appointment.date(),
            checked_in_at: at,
            status: QueueStatus::Waiting,
        };
        info!(
            token = %entry.token,
            appointment_id = %entry.appointment_id,
            doctor_id = %entry.doctor_id,
            "patient queued"
        );
        self.entries.push(entry.clone());
        entry
    }

    pub fn start_consultation(&mut self, date: NaiveDate, token: &str) -> SchedulingResult<&QueueEntry> {
        self.advance(date, token, QueueStatus::Waiting, QueueStatus::WithDoctor)
    }

    pub fn complete(&mut self, date: NaiveDate, token: &str) -> SchedulingResult<&QueueEntry> {
        self.advance(date, token, QueueStatus::WithDoctor, QueueStatus::Completed)
    }

    /// Close the entry for an appointment, whatever stage it reached.
    pub fn complete_appointment(&mut self, appointment_id: Uuid) -> Option<&QueueEntry> {
        self.close(appointment_id, QueueStatus::Completed)
    }

    /// Drop a cancelled visit out of the waiting room. Entries already
    /// closed keep their status.
    pub fn cancel_appointment(&mut self, appointment_id: Uuid) -> Option<&QueueEntry> {
        self.close(appointment_id, QueueStatus::Cancelled)
    }

    pub fn get(&self, date: NaiveDate, token: &str) -> Option<&QueueEntry> {
        self.entries
            .iter()
            .find(|e| e.date == date && e.token == token)
    }

    pub fn waiting(&self, date: NaiveDate) -> impl Iterator<Item = &QueueEntry> {
        self.entries
            .iter()
            .filter(move |e| e.date == date && e.status == QueueStatus::Waiting)
    }

    pub fn entries(&self, date: NaiveDate) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter().filter(move |e| e.date == date)
    }

    /// Minutes until the token is called: everyone ahead of it for the same
    /// doctor who is not yet done, times `average_minutes`. Zero once it has
    /// left the waiting state.
    pub fn estimated_wait(
        &self,
        date: NaiveDate,
        token: &str,
        average_minutes: u32,
    ) -> SchedulingResult<u32> {
        let position = self
            .entries
            .iter()
            .position(|e| e.date == date && e.token == token)
            .ok_or_else(|| SchedulingError::QueueEntryNotFound(token.to_string()))?;
        let entry = &self.entries[position];
        if entry.status != QueueStatus::Waiting {
            return Ok(0);
        }
        let ahead = self.entries[..position]
            .iter()
            .filter(|e| {
                e.date == date
                    && e.doctor_id == entry.doctor_id
                    && e.status.is_open()
            })
            .count();
        Ok(u32::try_from(ahead).unwrap_or(u32::MAX).saturating_mul(average_minutes))
    }

    fn close(&mut self, appointment_id: Uuid, status: QueueStatus) -> Option<&QueueEntry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.appointment_id == appointment_id)?;
        if entry.status.is_open() {
            entry.status = status;
            info!(token = %entry.token, %status, "queue entry closed");
        }
        Some(&*entry)
    }

    fn advance(
        &mut self,
        date: NaiveDate,
        token: &str,
        expected: QueueStatus,
        next: QueueStatus,
    ) -> SchedulingResult<&QueueEntry> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.date == date && e.token == token)
            .ok_or_else(|| SchedulingError::QueueEntryNotFound(token.to_string()))?;
        if entry.status != expected {
            return Err(SchedulingError::transition(entry.status, next));
        }
        entry.status = next;
        info!(token, status = %next, "queue entry advanced");
        Ok(&*entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingRequest;
    use crate::schedule::Schedule;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn booked(schedule: &mut Schedule, patient: &str, doctor: &str, time: &str) -> Appointment {
        schedule
            .book(BookingRequest::new(patient, doctor, "2026-02-14", time, "Consultation"))
            .unwrap()
    }

    #[test]
    fn test_tokens_are_sequential_per_day() {
        let mut schedule = Schedule::new();
        let a = booked(&mut schedule, "P001", "D001", "09:00");
        let b = booked(&mut schedule, "P002", "D001", "09:30");
        let other_day = schedule
            .book(BookingRequest::new("P003", "D001", "2026-02-15", "09:00", "Checkup"))
            .unwrap();

        let mut queue = CheckInQueue::new();
        assert_eq!(queue.enqueue(&a, at(8, 55)).token, "T01");
        assert_eq!(queue.enqueue(&b, at(9, 20)).token, "T02");
        assert_eq!(queue.enqueue(&other_day, at(8, 50)).token, "T01");
        assert_eq!(queue.enqueue(&a, at(9, 40)).token, "T01");
        assert_eq!(queue.entries(day()).count(), 2);
    }

    #[test]
    fn test_forward_only_progress() {
        let mut schedule = Schedule::new();
        let a = booked(&mut schedule, "P001", "D001", "09:00");
        let mut queue = CheckInQueue::new();
        queue.enqueue(&a, at(8, 55));

        assert!(matches!(
            queue.complete(day(), "T01"),
            Err(SchedulingError::InvalidTransition { .. })
        ));
        assert_eq!(
            queue.start_consultation(day(), "T01").unwrap().status,
            QueueStatus::WithDoctor
        );
        assert_eq!(queue.complete(day(), "T01").unwrap().status, QueueStatus::Completed);
        assert!(queue.start_consultation(day(), "T01").is_err());
        assert_eq!(
            queue.start_consultation(day(), "T09").unwrap_err(),
            SchedulingError::QueueEntryNotFound("T09".to_string())
        );
    }

    #[test]
    fn test_estimated_wait_counts_same_doctor_only() {
        let mut schedule = Schedule::new();
        let a = booked(&mut schedule, "P001", "D001", "09:00");
        let b = booked(&mut schedule, "P002", "D002", "09:00");
        let c = booked(&mut schedule, "P003", "D001", "09:15");
        let mut queue = CheckInQueue::new();
        queue.enqueue(&a, at(8, 50));
        queue.enqueue(&b, at(8, 52));
        queue.enqueue(&c, at(8, 58));

        assert_eq!(queue.estimated_wait(day(), "T01", 15).unwrap(), 0);
        assert_eq!(queue.estimated_wait(day(), "T03", 15).unwrap(), 15);

        queue.start_consultation(day(), "T01").unwrap();
        assert_eq!(queue.estimated_wait(day(), "T03", 15).unwrap(), 15);
        assert_eq!(queue.waiting(day()).count(), 2);

        queue.complete(day(), "T01").unwrap();
        assert_eq!(queue.estimated_wait(day(), "T03", 15).unwrap(), 0);
    }

    #[test]
    fn test_cancelled_entry_leaves_the_waiting_room() {
        let mut schedule = Schedule::new();
        let a = booked(&mut schedule, "P001", "D001", "09:00");
        let b = booked(&mut schedule, "P002", "D001", "09:15");
        let mut queue = CheckInQueue::new();
        queue.enqueue(&a, at(8, 50));
        queue.enqueue(&b, at(8, 55));
        assert_eq!(queue.estimated_wait(day(), "T02", 15).unwrap(), 15);

        let entry = queue.cancel_appointment(a.id()).unwrap();
        assert_eq!(entry.status, QueueStatus::Cancelled);
        assert_eq!(queue.estimated_wait(day(), "T02", 15).unwrap(), 0);
        assert_eq!(queue.waiting(day()).map(|e| e.token.as_str()).collect::<Vec<_>>(), vec!["T02"]);
        assert!(queue.start_consultation(day(), "T01").is_err());

        queue.start_consultation(day(), "T02").unwrap();
        queue.complete(day(), "T02").unwrap();
        assert_eq!(
            queue.cancel_appointment(b.id()).unwrap().status,
            QueueStatus::Completed
        );
    }
}
