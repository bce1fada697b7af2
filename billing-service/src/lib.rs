//! Billing Service for clinic front desks
//!
//! Provides the invoice engine and the ledger built on it:
//! - Line-item aggregation, percent or absolute discounts, fixed-rate tax
//! - Payment status derived from amount paid, recomputed on every read
//! - Invoice drafts filled from the treatment catalog
//! - Sequential invoice numbering and an in-memory invoice ledger
//! - Revenue reporting and currency display formatting
//!
//! All computations are pure and synchronous. Dates are supplied by the
//! caller; nothing here reads the wall clock.

pub mod calculation;
pub mod draft;
pub mod error;
pub mod format;
pub mod models;
pub mod numbering;
pub mod payment;
pub mod reporting;
pub mod service;

pub use calculation::*;
pub use draft::*;
pub use error::*;
pub use format::*;
pub use models::*;
pub use numbering::*;
pub use payment::*;
pub use reporting::*;
pub use service::*;
