use crate::ids::{CatalogItemId, DoctorId, PatientId};
use crate::models::{CatalogEntry, DoctorSummary, PatientSummary};

/// Resolve a patient id for display and outstanding-balance prefill.
pub trait PatientLookup {
    fn find_patient(&self, id: &PatientId) -> Option<PatientSummary>;
}

/// Resolve a doctor id to name and working weekdays.
pub trait DoctorLookup {
    fn find_doctor(&self, id: &DoctorId) -> Option<DoctorSummary>;
}

/// Resolve a catalog id to the name and price used on invoice lines.
pub trait TreatmentCatalog {
    /// Inactive treatments are not billable and resolve to `None`.
    fn find_treatment(&self, id: &CatalogItemId) -> Option<CatalogEntry>;
}
