use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Front-desk summary for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub date: NaiveDate,
    /// Appointments booked for the day, in any status.
    pub appointments: usize,
    /// Patients who arrived: `CheckedIn` or `Completed`.
    pub checked_in: usize,
    /// Queue entries still waiting for a doctor.
    pub waiting: usize,
    /// Balance due across every invoice on the ledger.
    pub pending_payments: Decimal,
    /// Open follow-ups due on or before the day.
    pub follow_ups_due: usize,
    /// Doctors working that weekday who are not on leave.
    pub doctors_available: usize,
}
