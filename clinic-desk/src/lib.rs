//! Front desk for a single-location clinic
//!
//! [`ClinicDesk`] owns the reference directory, the invoice ledger, the
//! appointment calendar, the check-in queue and the follow-up book, and
//! runs the everyday flows across them:
//!
//! - booking and rescheduling visits
//! - checking patients in and calling them through the queue
//! - billing and collecting payments
//! - reminding patients about follow-ups and sending receipts
//!
//! Errors from every engine surface as [`DeskError`], which keeps the
//! stable code of the underlying failure.

pub mod dashboard;
pub mod desk;
pub mod error;
pub mod messages;
pub mod navigation;
pub mod seed;

pub use dashboard::*;
pub use desk::*;
pub use error::*;
pub use navigation::*;
