use clinic_directory::{DoctorId, PatientId};
use serde::{Deserialize, Serialize};

/// Every screen the front desk can move to, with the data it opens with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum NavigationTarget {
    #[default]
    Dashboard,
    Patients,
    PatientProfile { patient_id: PatientId },
    AddPatient,
    Appointments { doctor_filter: Option<DoctorId> },
    Billing { patient_id: Option<PatientId> },
    #[serde(rename = "followups")]
    FollowUps,
    Reports,
    Doctors,
    Treatments,
    Settings,
}

impl NavigationTarget {
    pub fn slug(&self) -> &'static str {
        match self {
            NavigationTarget::Dashboard => "dashboard",
            NavigationTarget::Patients => "patients",
            NavigationTarget::PatientProfile { .. } => "patient-profile",
            NavigationTarget::AddPatient => "add-patient",
            NavigationTarget::Appointments { .. } => "appointments",
            NavigationTarget::Billing { .. } => "billing",
            NavigationTarget::FollowUps => "followups",
            NavigationTarget::Reports => "reports",
            NavigationTarget::Doctors => "doctors",
            NavigationTarget::Treatments => "treatments",
            NavigationTarget::Settings => "settings",
        }
    }

    /// Resolve a page slug. Pages that need a patient fall back to the
    /// patient list without one; anything unknown lands on the dashboard.
    pub fn from_slug(slug: &str, patient_id: Option<PatientId>) -> Self {
        match slug {
            "patients" => NavigationTarget::Patients,
            "patient-profile" => match patient_id {
                Some(patient_id) => NavigationTarget::PatientProfile { patient_id },
                None => NavigationTarget::Patients,
            },
            "add-patient" => NavigationTarget::AddPatient,
            "appointments" => NavigationTarget::Appointments { doctor_filter: None },
            "billing" => NavigationTarget::Billing { patient_id },
            "followups" => NavigationTarget::FollowUps,
            "reports" => NavigationTarget::Reports,
            "doctors" => NavigationTarget::Doctors,
            "treatments" => NavigationTarget::Treatments,
            "settings" => NavigationTarget::Settings,
            _ => NavigationTarget::Dashboard,
        }
    }

    /// Whether the sidebar shows this target as a top-level entry.
    pub fn in_sidebar(&self) -> bool {
        !matches!(
            self,
            NavigationTarget::PatientProfile { .. } | NavigationTarget::AddPatient
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_resolves_back() {
        let targets = [
            NavigationTarget::Dashboard,
            NavigationTarget::Patients,
            NavigationTarget::PatientProfile {
                patient_id: "P001".into(),
            },
            NavigationTarget::AddPatient,
            NavigationTarget::Appointments {
                doctor_filter: None,
            },
            NavigationTarget::Billing {
                patient_id: Some("P001".into()),
            },
            NavigationTarget::FollowUps,
            NavigationTarget::Reports,
            NavigationTarget::Doctors,
            NavigationTarget::Treatments,
            NavigationTarget::Settings,
        ];
        for target in targets {
            let patient_id = match &target {
                NavigationTarget::PatientProfile { patient_id } => Some(patient_id.clone()),
                NavigationTarget::Billing { patient_id } => patient_id.clone(),
                _ => None,
            };
            assert_eq!(NavigationTarget::from_slug(target.slug(), patient_id), target);
        }
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(
            NavigationTarget::from_slug("patient-profile", None),
            NavigationTarget::Patients
        );
        assert_eq!(
            NavigationTarget::from_slug("lab-results", None),
            NavigationTarget::Dashboard
        );
        assert!(!NavigationTarget::AddPatient.in_sidebar());
        assert!(NavigationTarget::Reports.in_sidebar());
    }
}
