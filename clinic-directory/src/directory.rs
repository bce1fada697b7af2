use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::ids::{CatalogItemId, DoctorId, PatientId};
use crate::lookup::{DoctorLookup, PatientLookup, TreatmentCatalog};
use crate::models::{
    CatalogEntry, Doctor, DoctorSummary, Patient, PatientSummary, Treatment,
};

/// In-memory reference data, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct ClinicDirectory {
    patients: BTreeMap<PatientId, Patient>,
    doctors: BTreeMap<DoctorId, Doctor>,
    treatments: BTreeMap<CatalogItemId, Treatment>,
}

impl ClinicDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record previously stored under the same id.
    pub fn add_patient(&mut self, patient: Patient) -> Option<Patient> {
        debug!(patient_id = %patient.id, "registering patient");
        self.patients.insert(patient.id.clone(), patient)
    }

    pub fn add_doctor(&mut self, doctor: Doctor) -> Option<Doctor> {
        self.doctors.insert(doctor.id.clone(), doctor)
    }

    pub fn add_treatment(&mut self, treatment: Treatment) -> Option<Treatment> {
        self.treatments.insert(treatment.id.clone(), treatment)
    }

    pub fn patient(&self, id: &PatientId) -> Option<&Patient> {
        self.patients.get(id)
    }

    pub fn doctor(&self, id: &DoctorId) -> Option<&Doctor> {
        self.doctors.get(id)
    }

    pub fn treatment(&self, id: &CatalogItemId) -> Option<&Treatment> {
        self.treatments.get(id)
    }

    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.values()
    }

    pub fn doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.values()
    }

    pub fn treatments(&self) -> impl Iterator<Item = &Treatment> {
        self.treatments.values()
    }

    /// Doctors whose weekly availability covers `date`.
    pub fn doctors_working_on(&self, date: NaiveDate) -> impl Iterator<Item = &Doctor> {
        self.doctors.values().filter(move |d| d.works_on(date))
    }
}

impl PatientLookup for ClinicDirectory {
    fn find_patient(&self, id: &PatientId) -> Option<PatientSummary> {
        self.patients.get(id).map(|p| PatientSummary {
            name: p.name.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            outstanding_due: p.outstanding_due,
        })
    }
}

impl DoctorLookup for ClinicDirectory {
    fn find_doctor(&self, id: &DoctorId) -> Option<DoctorSummary> {
        self.doctors.get(id).map(|d| DoctorSummary {
            name: d.name.clone(),
            availability: d.availability.clone(),
        })
    }
}

impl TreatmentCatalog for ClinicDirectory {
    fn find_treatment(&self, id: &CatalogItemId) -> Option<CatalogEntry> {
        self.treatments
            .get(id)
            .filter(|t| t.active)
            .map(|t| CatalogEntry {
                name: t.name.clone(),
                unit_price: t.price,
            })
    }
}
