use chrono::NaiveDate;
use clinic_directory::PatientId;
use serde::Serialize;
use std::fmt;
use tracing::info;
use uuid::Uuid;

use crate::error::{SchedulingError, SchedulingResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Confirmed,
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReminderStatus::Pending => "Pending",
            ReminderStatus::Sent => "Sent",
            ReminderStatus::Confirmed => "Confirmed",
        })
    }
}

/// A next-visit reminder for a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowUp {
    pub id: Uuid,
    pub patient_id: PatientId,
    pub next_visit_date: NaiveDate,
    pub reason: String,
    pub reminder_status: ReminderStatus,
    pub notes: Option<String>,
    pub done: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FollowUpBook {
    follow_ups: Vec<FollowUp>,
}

impl FollowUpBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        patient_id: impl Into<PatientId>,
        next_visit_date: NaiveDate,
        reason: impl Into<String>,
        notes: Option<String>,
    ) -> FollowUp {
        let follow_up = FollowUp {
            id: Uuid::new_v4(),
            patient_id: patient_id.into(),
            next_visit_date,
            reason: reason.into(),
            reminder_status: ReminderStatus::Pending,
            notes,
            done: false,
        };
        info!(
            follow_up_id = %follow_up.id,
            patient_id = %follow_up.patient_id,
            date = %next_visit_date,
            "follow-up scheduled"
        );
        self.follow_ups.push(follow_up.clone());
        follow_up
    }

    pub fn get(&self, id: Uuid) -> Option<&FollowUp> {
        self.follow_ups.iter().find(|f| f.id == id)
    }

    pub fn all(&self) -> &[FollowUp] {
        &self.follow_ups
    }

    /// Open follow-ups whose next visit falls on `date`.
    pub fn due_on(&self, date: NaiveDate) -> impl Iterator<Item = &FollowUp> {
        self.follow_ups
            .iter()
            .filter(move |f| !f.done && f.next_visit_date == date)
    }

    /// Open follow-ups on or before `date`, including overdue ones.
    pub fn due_by(&self, date: NaiveDate) -> impl Iterator<Item = &FollowUp> {
        self.follow_ups
            .iter()
            .filter(move |f| !f.done && f.next_visit_date <= date)
    }

    pub fn mark_sent(&mut self, id: Uuid) -> SchedulingResult<&FollowUp> {
        self.advance(id, ReminderStatus::Pending, ReminderStatus::Sent)
    }

    pub fn mark_confirmed(&mut self, id: Uuid) -> SchedulingResult<&FollowUp> {
        self.advance(id, ReminderStatus::Sent, ReminderStatus::Confirmed)
    }

    pub fn mark_done(&mut self, id: Uuid) -> SchedulingResult<&FollowUp> {
        let follow_up = self.get_mut(id)?;
        follow_up.done = true;
        info!(follow_up_id = %id, "follow-up closed");
        Ok(&*follow_up)
    }

    fn get_mut(&mut self, id: Uuid) -> SchedulingResult<&mut FollowUp> {
        self.follow_ups
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(SchedulingError::FollowUpNotFound(id))
    }

    fn advance(
        &mut self,
        id: Uuid,
        expected: ReminderStatus,
        next: ReminderStatus,
    ) -> SchedulingResult<&FollowUp> {
        let follow_up = self.get_mut(id)?;
        if follow_up.reminder_status != expected {
            return Err(SchedulingError::transition(follow_up.reminder_status, next));
        }
        follow_up.reminder_status = next;
        info!(follow_up_id = %id, status = %next, "reminder status changed");
        Ok(&*follow_up)
    }
}
