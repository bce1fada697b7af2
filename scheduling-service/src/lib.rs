//! Appointment scheduling for a single clinic
//!
//! - **Schedule**: per-day appointment lists kept in time order, stable for
//!   equal times, with booking, rescheduling and status transitions
//! - **Lifecycle**: the forward-only visit state machine
//!   (`Scheduled → CheckedIn → Completed`, with `Cancelled` and `NoShow`
//!   as terminal exits)
//! - **Slot grid**: projection of a doctor's day onto the calendar's hour rows
//! - **Check-in queue**: walk-in style tokens issued as patients arrive
//! - **Follow-ups**: next-visit reminders and their delivery status
//!
//! Double-booking a doctor is allowed on purpose; staff resolve overlaps on
//! the calendar. Every operation validates before mutating, so a failed call
//! leaves the schedule exactly as it was.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use scheduling_service::{AppointmentStatus, BookingRequest, Schedule};
//!
//! let mut schedule = Schedule::new();
//! let appt = schedule.book(BookingRequest::new(
//!     "P001", "D001", "2026-02-14", "09:00", "Consultation",
//! ))?;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
//! schedule.transition(appt.id(), AppointmentStatus::CheckedIn, today)?;
//! # Ok::<(), scheduling_service::SchedulingError>(())
//! ```

pub mod error;
pub mod followup;
pub mod grid;
pub mod lifecycle;
pub mod models;
pub mod queue;
pub mod schedule;

pub use error::*;
pub use followup::*;
pub use grid::*;
pub use models::*;
pub use queue::*;
pub use schedule::*;
