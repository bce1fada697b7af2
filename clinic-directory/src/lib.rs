//! Reference data for ClinicDesk
//!
//! Patients, doctors and the treatment catalog are owned outside the billing
//! and scheduling engines. The engines only see them through the lookup
//! traits in [`lookup`]; [`ClinicDirectory`] is the in-memory implementation
//! used by the front desk and by tests.

pub mod directory;
pub mod ids;
pub mod lookup;
pub mod models;

pub use directory::*;
pub use ids::*;
pub use lookup::*;
pub use models::*;
