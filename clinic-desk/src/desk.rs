use billing_service::{
    BillingError, BillingService, CurrencyFormat, Invoice, InvoiceDraft, PaymentMethod, RevenueReport,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clinic_directory::{ClinicDirectory, DoctorStatus, Patient, PatientId};
use config_engine::ClinicConfig;
use error_common::{log_error, ErrorContext};
use notification_service::{Channel, DispatchReceipt, NotificationDispatcher, NotificationRequest};
use rust_decimal::Decimal;
use scheduling_service::{
    Appointment, AppointmentStatus, BookingRequest, CheckInQueue, FollowUp, FollowUpBook,
    QueueEntry, ReminderStatus, Schedule, SchedulingError, SlotGrid,
};
use tracing::info;
use uuid::Uuid;

use crate::dashboard::DashboardStats;
use crate::error::{DeskError, DeskResult};
use crate::messages;

/// One clinic's front desk: reference data, ledger, calendar, waiting room
/// and follow-up book behind a single owner.
#[derive(Debug)]
pub struct ClinicDesk {
    config: ClinicConfig,
    directory: ClinicDirectory,
    billing: BillingService,
    schedule: Schedule,
    queue: CheckInQueue,
    follow_ups: FollowUpBook,
    grid: SlotGrid,
    currency: CurrencyFormat,
}

impl ClinicDesk {
    pub fn new(config: ClinicConfig, directory: ClinicDirectory) -> DeskResult<Self> {
        let grid = SlotGrid::from_config(&config.grid)?;
        let billing = BillingService::from_config(&config.billing);
        let currency = CurrencyFormat::from(&config.billing);

        info!(
            clinic = %config.clinic_name,
            tax_rate = %billing.tax_rate().percent(),
            "front desk ready"
        );

        Ok(Self {
            config,
            directory,
            billing,
            schedule: Schedule::new(),
            queue: CheckInQueue::new(),
            follow_ups: FollowUpBook::new(),
            grid,
            currency,
        })
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn directory(&self) -> &ClinicDirectory {
        &self.directory
    }

    pub fn billing(&self) -> &BillingService {
        &self.billing
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn queue(&self) -> &CheckInQueue {
        &self.queue
    }

    pub fn follow_ups(&self) -> &FollowUpBook {
        &self.follow_ups
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub(crate) fn follow_ups_mut(&mut self) -> &mut FollowUpBook {
        &mut self.follow_ups
    }

    // Scheduling

    /// Book a visit. Unknown doctors, off days and double bookings are
    /// logged, not refused.
    pub fn book(&mut self, request: BookingRequest) -> DeskResult<Appointment> {
        let patient_id = request.patient_id.clone();
        self.schedule
            .book_checked(request, &self.directory)
            .map_err(|e| report("book", patient_id.as_str(), e))
    }

    pub fn reschedule(
        &mut self,
        appointment_id: Uuid,
        new_date: &str,
        new_time: &str,
    ) -> DeskResult<Appointment> {
        self.schedule
            .reschedule(appointment_id, new_date, new_time)
            .map_err(|e| report("reschedule", &appointment_id.to_string(), e))
    }

    pub fn cancel(&mut self, appointment_id: Uuid, today: NaiveDate) -> DeskResult<Appointment> {
        let appointment = self
            .schedule
            .transition(appointment_id, AppointmentStatus::Cancelled, today)
            .map_err(|e| report("cancel", &appointment_id.to_string(), e))?;
        self.queue.cancel_appointment(appointment_id);
        Ok(appointment)
    }

    /// Mark the patient as arrived and hand out a queue token.
    pub fn check_in(&mut self, appointment_id: Uuid, now: NaiveDateTime) -> DeskResult<QueueEntry> {
        let appointment = self
            .schedule
            .check_in(appointment_id, now.date())
            .map_err(|e| report("check_in", &appointment_id.to_string(), e))?;
        Ok(self.queue.enqueue(&appointment, now))
    }

    /// Call the next token in to the doctor.
    pub fn start_consultation(&mut self, date: NaiveDate, token: &str) -> DeskResult<QueueEntry> {
        self.queue
            .start_consultation(date, token)
            .cloned()
            .map_err(|e| report("start_consultation", token, e))
    }

    pub fn complete_visit(&mut self, appointment_id: Uuid, today: NaiveDate) -> DeskResult<Appointment> {
        let appointment = self
            .schedule
            .transition(appointment_id, AppointmentStatus::Completed, today)
            .map_err(|e| report("complete_visit", &appointment_id.to_string(), e))?;
        self.queue.complete_appointment(appointment_id);
        Ok(appointment)
    }

    /// Sweep `date` for missed visits using the configured grace period.
    pub fn mark_no_shows(&mut self, date: NaiveDate, now: NaiveDateTime) -> Vec<Uuid> {
        let grace = Duration::minutes(i64::from(self.config.scheduling.no_show_grace_minutes));
        self.schedule.mark_no_shows(date, now, grace)
    }

    pub fn estimated_wait(&self, date: NaiveDate, token: &str) -> DeskResult<u32> {
        Ok(self.queue.estimated_wait(
            date,
            token,
            self.config.scheduling.average_consultation_minutes,
        )?)
    }

    // Billing

    pub fn create_invoice(&mut self, draft: InvoiceDraft, issue_date: NaiveDate) -> DeskResult<Invoice> {
        let patient_id = draft.patient_id.clone();
        self.billing
            .finalize(draft, &self.directory, issue_date)
            .map_err(|e| report("create_invoice", patient_id.as_str(), e))
    }

    pub fn record_payment(
        &mut self,
        invoice_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> DeskResult<Invoice> {
        self.billing
            .record_payment(invoice_id, amount, method)
            .map_err(|e| report("record_payment", &invoice_id.to_string(), e))
    }

    pub fn revenue_report(&self, start: NaiveDate, end: NaiveDate) -> RevenueReport {
        RevenueReport::build(self.billing.all(), start, end)
    }

    // Follow-ups and notifications

    pub fn schedule_follow_up(
        &mut self,
        patient_id: PatientId,
        next_visit_date: NaiveDate,
        reason: impl Into<String>,
        notes: Option<String>,
    ) -> DeskResult<FollowUp> {
        self.patient(&patient_id)?;
        Ok(self.follow_ups.schedule(patient_id, next_visit_date, reason, notes))
    }

    pub fn confirm_follow_up(&mut self, follow_up_id: Uuid) -> DeskResult<FollowUp> {
        Ok(self.follow_ups.mark_confirmed(follow_up_id)?.clone())
    }

    pub fn close_follow_up(&mut self, follow_up_id: Uuid) -> DeskResult<FollowUp> {
        Ok(self.follow_ups.mark_done(follow_up_id)?.clone())
    }

    /// Send the reminder for a pending follow-up. The reminder is marked
    /// `Sent` only once the dispatcher has accepted it.
    pub async fn send_follow_up_reminder(
        &mut self,
        dispatcher: &dyn NotificationDispatcher,
        follow_up_id: Uuid,
        channel: Channel,
    ) -> DeskResult<DispatchReceipt> {
        let follow_up = self
            .follow_ups
            .get(follow_up_id)
            .ok_or(SchedulingError::FollowUpNotFound(follow_up_id))?;
        if follow_up.reminder_status != ReminderStatus::Pending {
            return Err(report(
                "send_follow_up_reminder",
                &follow_up_id.to_string(),
                SchedulingError::InvalidTransition {
                    from: follow_up.reminder_status.to_string(),
                    to: ReminderStatus::Sent.to_string(),
                },
            ));
        }

        let patient = self.patient(&follow_up.patient_id)?;
        let contact = contact_for(patient, channel)?;
        let message =
            messages::follow_up_reminder(&self.config.clinic_name, &patient.name, follow_up);

        let receipt = dispatcher
            .dispatch(NotificationRequest::new(channel, contact, message))
            .await
            .map_err(|e| report("send_follow_up_reminder", &follow_up_id.to_string(), e))?;

        self.follow_ups.mark_sent(follow_up_id)?;
        Ok(receipt)
    }

    pub async fn send_receipt(
        &self,
        dispatcher: &dyn NotificationDispatcher,
        invoice_id: Uuid,
        channel: Channel,
    ) -> DeskResult<DispatchReceipt> {
        let invoice = self
            .billing
            .get(invoice_id)
            .ok_or(BillingError::InvoiceNotFound(invoice_id))?;
        let patient = self.patient(invoice.patient_id())?;
        let contact = contact_for(patient, channel)?;
        let message = messages::invoice_receipt(
            &self.config.clinic_name,
            &patient.name,
            invoice,
            &self.currency,
        );

        dispatcher
            .dispatch(NotificationRequest::new(channel, contact, message))
            .await
            .map_err(|e| report("send_receipt", &invoice_id.to_string(), e))
    }

    // Dashboard

    pub fn dashboard(&self, date: NaiveDate) -> DashboardStats {
        let day = self.schedule.day(date);
        DashboardStats {
            date,
            appointments: day.len(),
            checked_in: day
                .iter()
                .filter(|a| {
                    matches!(
                        a.status(),
                        AppointmentStatus::CheckedIn | AppointmentStatus::Completed
                    )
                })
                .count(),
            waiting: self.queue.waiting(date).count(),
            pending_payments: self.billing.total_outstanding(),
            follow_ups_due: self.follow_ups.due_by(date).count(),
            doctors_available: self
                .directory
                .doctors_working_on(date)
                .filter(|d| d.status != DoctorStatus::OnLeave)
                .count(),
        }
    }

    fn patient(&self, patient_id: &PatientId) -> DeskResult<&Patient> {
        self.directory
            .patient(patient_id)
            .ok_or_else(|| DeskError::UnknownPatient(patient_id.clone()))
    }
}

fn contact_for(patient: &Patient, channel: Channel) -> DeskResult<String> {
    if channel.is_phone() {
        return Ok(patient.phone.clone());
    }
    patient
        .email
        .clone()
        .ok_or_else(|| DeskError::MissingContact {
            patient_id: patient.id.clone(),
            channel,
        })
}

/// Log a rejected desk operation and pass the error on.
fn report(operation: &str, entity_id: &str, error: impl Into<DeskError>) -> DeskError {
    let error = error.into();
    log_error(
        &ErrorContext::new(operation).with_entity_id(entity_id),
        &error,
    );
    error
}
