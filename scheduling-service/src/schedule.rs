use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use clinic_directory::{DoctorId, DoctorLookup};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{SchedulingError, SchedulingResult};
use crate::models::{parse_date, parse_time, Appointment, AppointmentStatus, BookingRequest};

/// Per-day appointment lists.
///
/// Each day is ordered by time; appointments at the same time keep the
/// order in which they were placed on that day.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, Vec<Appointment>>,
    index: HashMap<Uuid, NaiveDate>,
}

/// One appointment placed on the slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement<'a> {
    pub appointment: &'a Appointment,
    pub vertical_offset: u32,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a new `Scheduled` visit.
    ///
    /// Fails with `InvalidSchedule` for a malformed date or a time outside
    /// the day. Overlapping bookings for the same doctor are accepted.
    pub fn book(&mut self, request: BookingRequest) -> SchedulingResult<Appointment> {
        let date = parse_date(&request.date)?;
        let time = parse_time(&request.time)?;

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            date,
            time,
            visit_type: request.visit_type,
            status: AppointmentStatus::Scheduled,
            is_walk_in: request.is_walk_in,
            notes: request.notes,
        };

        let overlapping = self
            .day(date)
            .iter()
            .filter(|a| {
                a.doctor_id == appointment.doctor_id && a.time == time && a.status.is_active()
            })
            .count();
        if overlapping > 0 {
            info!(
                doctor_id = %appointment.doctor_id,
                %date,
                %time,
                overlapping,
                "doctor double-booked"
            );
        }

        info!(
            appointment_id = %appointment.id,
            patient_id = %appointment.patient_id,
            doctor_id = %appointment.doctor_id,
            %date,
            %time,
            "appointment booked"
        );

        self.insert(appointment.clone());
        Ok(appointment)
    }

    /// [`Schedule::book`], warning when the doctor is unknown or does not
    /// work on that weekday. Neither case is rejected.
    pub fn book_checked(
        &mut self,
        request: BookingRequest,
        doctors: &dyn DoctorLookup,
    ) -> SchedulingResult<Appointment> {
        let appointment = self.book(request)?;
        match doctors.find_doctor(&appointment.doctor_id) {
            None => warn!(doctor_id = %appointment.doctor_id, "booked with unknown doctor"),
            Some(doctor) => {
                if !doctor.availability.contains(&appointment.date.weekday()) {
                    warn!(
                        doctor = %doctor.name,
                        date = %appointment.date,
                        weekday = ?appointment.date.weekday(),
                        "booked outside doctor's availability"
                    );
                }
            }
        }
        Ok(appointment)
    }

    /// Move a `Scheduled` visit to a new date and time.
    pub fn reschedule(
        &mut self,
        appointment_id: Uuid,
        new_date: &str,
        new_time: &str,
    ) -> SchedulingResult<Appointment> {
        let date = parse_date(new_date)?;
        let time = parse_time(new_time)?;

        let current = self
            .get(appointment_id)
            .ok_or(SchedulingError::AppointmentNotFound(appointment_id))?;
        if current.status != AppointmentStatus::Scheduled {
            warn!(%appointment_id, status = %current.status, "reschedule rejected");
            return Err(SchedulingError::transition(current.status, "Rescheduled"));
        }

        let mut appointment = self
            .remove(appointment_id)
            .ok_or(SchedulingError::AppointmentNotFound(appointment_id))?;
        let (old_date, old_time) = (appointment.date, appointment.time);
        appointment.date = date;
        appointment.time = time;
        self.insert(appointment.clone());

        info!(
            %appointment_id,
            from = %format!("{old_date} {old_time}"),
            to = %format!("{date} {time}"),
            "appointment rescheduled"
        );
        Ok(appointment)
    }

    /// Apply one step of the visit state machine.
    ///
    /// Check-in is only allowed on the appointment's own date, which the
    /// caller supplies as `today`.
    pub fn transition(
        &mut self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
        today: NaiveDate,
    ) -> SchedulingResult<Appointment> {
        let appointment = self
            .get_mut(appointment_id)
            .ok_or(SchedulingError::AppointmentNotFound(appointment_id))?;

        let from = appointment.status;
        if !from.can_transition_to(new_status) {
            warn!(%appointment_id, %from, to = %new_status, "invalid status transition");
            return Err(SchedulingError::transition(from, new_status));
        }
        if new_status == AppointmentStatus::CheckedIn && appointment.date != today {
            warn!(%appointment_id, date = %appointment.date, %today, "check-in outside visit day");
            return Err(SchedulingError::transition(
                from,
                format!("{new_status} on {today}"),
            ));
        }

        appointment.status = new_status;
        info!(%appointment_id, %from, to = %new_status, "appointment status changed");
        Ok(appointment.clone())
    }

    pub fn check_in(&mut self, appointment_id: Uuid, today: NaiveDate) -> SchedulingResult<Appointment> {
        self.transition(appointment_id, AppointmentStatus::CheckedIn, today)
    }

    /// Mark every `Scheduled` visit on `date` whose start plus `grace` is
    /// already past `now` as `NoShow`. Returns the ids that changed.
    pub fn mark_no_shows(
        &mut self,
        date: NaiveDate,
        now: NaiveDateTime,
        grace: Duration,
    ) -> Vec<Uuid> {
        let mut marked = Vec::new();
        if let Some(day) = self.days.get_mut(&date) {
            for appointment in day.iter_mut() {
                let cutoff = date.and_time(appointment.time) + grace;
                if appointment.status == AppointmentStatus::Scheduled && cutoff < now {
                    appointment.status = AppointmentStatus::NoShow;
                    marked.push(appointment.id);
                }
            }
        }
        if !marked.is_empty() {
            info!(%date, count = marked.len(), "appointments marked as no-show");
        }
        marked
    }

    /// Appointments on `date` in display order.
    pub fn day(&self, date: NaiveDate) -> &[Appointment] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn for_doctor<'a>(
        &'a self,
        date: NaiveDate,
        doctor_id: &'a DoctorId,
    ) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.day(date).iter().filter(move |a| &a.doctor_id == doctor_id)
    }

    pub fn get(&self, appointment_id: Uuid) -> Option<&Appointment> {
        let date = self.index.get(&appointment_id)?;
        self.days.get(date)?.iter().find(|a| a.id == appointment_id)
    }

    /// Dates that have at least one appointment, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Lazily place a doctor's appointments on the hour grid.
    ///
    /// `vertical_offset = (hour - slot_start_hour) * slot_height`, using the
    /// hour of the booked time, saturating at `u32::MAX`. Appointments outside
    /// `[slot_start_hour, slot_end_hour)` are skipped.
    pub fn project_to_grid<'a>(
        &'a self,
        date: NaiveDate,
        doctor_id: &'a DoctorId,
        slot_start_hour: u32,
        slot_end_hour: u32,
        slot_height: u32,
    ) -> impl Iterator<Item = GridPlacement<'a>> + 'a {
        self.for_doctor(date, doctor_id).filter_map(move |appointment| {
            let hour = appointment.time.hour();
            (slot_start_hour..slot_end_hour)
                .contains(&hour)
                .then(|| GridPlacement {
                    appointment,
                    vertical_offset: (hour - slot_start_hour).saturating_mul(slot_height),
                })
        })
    }

    fn get_mut(&mut self, appointment_id: Uuid) -> Option<&mut Appointment> {
        let date = self.index.get(&appointment_id)?;
        self.days
            .get_mut(date)?
            .iter_mut()
            .find(|a| a.id == appointment_id)
    }

    // After the last appointment with a time <= the new one, so equal
    // times keep placement order.
    fn insert(&mut self, appointment: Appointment) {
        let day = self.days.entry(appointment.date).or_default();
        let position = day.partition_point(|a| a.time <= appointment.time);
        debug!(date = %appointment.date, position, "inserting appointment");
        self.index.insert(appointment.id, appointment.date);
        day.insert(position, appointment);
    }

    fn remove(&mut self, appointment_id: Uuid) -> Option<Appointment> {
        let date = self.index.remove(&appointment_id)?;
        let day = self.days.get_mut(&date)?;
        let position = day.iter().position(|a| a.id == appointment_id)?;
        let appointment = day.remove(position);
        if day.is_empty() {
            self.days.remove(&date);
        }
        Some(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn valentines() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    fn request(patient: &str, doctor: &str, time: &str) -> BookingRequest {
        BookingRequest::new(patient, doctor, "2026-02-14", time, "Consultation")
    }

    #[test]
    fn test_day_is_time_ordered() {
        let mut schedule = Schedule::new();
        schedule.book(request("P003", "D001", "11:00")).unwrap();
        schedule.book(request("P001", "D001", "09:00")).unwrap();
        schedule.book(request("P002", "D002", "09:30")).unwrap();

        let times: Vec<String> = schedule
            .day(valentines())
            .iter()
            .map(|a| a.time().format("%H:%M").to_string())
            .collect();
        assert_eq!(times, vec!["09:00", "09:30", "11:00"]);
        assert_eq!(schedule.len(), 3);
    }

    #[test]
    fn test_invalid_booking_leaves_schedule_empty() {
        let mut schedule = Schedule::new();
        assert!(matches!(
            schedule.book(request("P001", "D001", "24:00")),
            Err(SchedulingError::InvalidSchedule(_))
        ));
        assert!(matches!(
            schedule.book(BookingRequest::new("P001", "D001", "2026-02-30", "10:00", "Consultation")),
            Err(SchedulingError::InvalidSchedule(_))
        ));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_reschedule_moves_between_days() {
        let mut schedule = Schedule::new();
        let appt = schedule.book(request("P001", "D001", "09:00")).unwrap();
        schedule.book(request("P002", "D001", "10:00")).unwrap();

        let moved = schedule.reschedule(appt.id(), "2026-02-16", "15:30").unwrap();
        assert_eq!(moved.date(), NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert_eq!(moved.time(), NaiveTime::from_hms_opt(15, 30, 0).unwrap());
        assert_eq!(schedule.day(valentines()).len(), 1);
        assert_eq!(schedule.get(appt.id()).unwrap().date(), moved.date());
        assert_eq!(schedule.dates().count(), 2);
    }

    #[test]
    fn test_reschedule_to_empty_day_drops_old_day() {
        let mut schedule = Schedule::new();
        let appt = schedule.book(request("P001", "D001", "09:00")).unwrap();
        schedule.reschedule(appt.id(), "2026-02-15", "09:00").unwrap();
        assert_eq!(schedule.dates().collect::<Vec<_>>(), vec![NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()]);
    }

    #[test]
    fn test_reschedule_with_bad_time_changes_nothing() {
        let mut schedule = Schedule::new();
        let appt = schedule.book(request("P001", "D001", "09:00")).unwrap();
        assert!(schedule.reschedule(appt.id(), "2026-02-15", "99:00").is_err());
        assert_eq!(schedule.get(appt.id()), Some(&appt));
    }

    #[test]
    fn test_check_in_only_on_visit_day() {
        let mut schedule = Schedule::new();
        let appt = schedule.book(request("P001", "D001", "09:00")).unwrap();

        let yesterday = valentines().pred_opt().unwrap();
        assert!(matches!(
            schedule.check_in(appt.id(), yesterday),
            Err(SchedulingError::InvalidTransition { .. })
        ));
        assert_eq!(schedule.get(appt.id()).unwrap().status(), AppointmentStatus::Scheduled);

        let checked_in = schedule.check_in(appt.id(), valentines()).unwrap();
        assert_eq!(checked_in.status(), AppointmentStatus::CheckedIn);
    }

    #[test]
    fn test_unknown_appointment() {
        let mut schedule = Schedule::new();
        let id = Uuid::new_v4();
        assert_eq!(
            schedule.transition(id, AppointmentStatus::Cancelled, valentines()),
            Err(SchedulingError::AppointmentNotFound(id))
        );
        assert_eq!(
            schedule.reschedule(id, "2026-02-15", "10:00"),
            Err(SchedulingError::AppointmentNotFound(id))
        );
    }

    #[test]
    fn test_no_show_sweep() {
        let mut schedule = Schedule::new();
        let early = schedule.book(request("P001", "D001", "09:00")).unwrap();
        let late = schedule.book(request("P002", "D001", "10:00")).unwrap();
        let arrived = schedule.book(request("P003", "D002", "09:00")).unwrap();
        schedule.check_in(arrived.id(), valentines()).unwrap();

        let now = valentines().and_hms_opt(10, 15, 0).unwrap();
        let marked = schedule.mark_no_shows(valentines(), now, Duration::minutes(30));

        assert_eq!(marked, vec![early.id()]);
        assert_eq!(schedule.get(late.id()).unwrap().status(), AppointmentStatus::Scheduled);
        assert_eq!(schedule.get(arrived.id()).unwrap().status(), AppointmentStatus::CheckedIn);
    }

    #[test]
    fn test_grid_projection() {
        let mut schedule = Schedule::new();
        schedule.book(request("P001", "D001", "08:30")).unwrap();
        schedule.book(request("P002", "D001", "09:30")).unwrap();
        schedule.book(request("P003", "D001", "12:00")).unwrap();
        schedule.book(request("P004", "D002", "12:00")).unwrap();
        schedule.book(request("P005", "D001", "19:00")).unwrap();

        let doctor: DoctorId = "D001".into();
        let placements: Vec<(String, u32)> = schedule
            .project_to_grid(valentines(), &doctor, 9, 19, 60)
            .map(|p| (p.appointment.patient_id().to_string(), p.vertical_offset))
            .collect();

        assert_eq!(
            placements,
            vec![("P002".to_string(), 0), ("P003".to_string(), 180)]
        );
    }

    #[test]
    fn test_grid_projection_saturates_tall_slots() {
        let mut schedule = Schedule::new();
        schedule.book(request("P001", "D001", "09:30")).unwrap();
        schedule.book(request("P002", "D001", "12:00")).unwrap();

        let doctor: DoctorId = "D001".into();
        let offsets: Vec<u32> = schedule
            .project_to_grid(valentines(), &doctor, 9, 19, u32::MAX)
            .map(|p| p.vertical_offset)
            .collect();

        assert_eq!(offsets, vec![0, u32::MAX]);
    }
}
