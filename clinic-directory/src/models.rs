use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ids::{CatalogItemId, DoctorId, PatientId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Registered patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub phone: String,
    pub alternate_phone: Option<String>,
    pub email: Option<String>,
    pub age: u8,
    pub gender: Gender,
    pub blood_group: Option<String>,
    pub address: String,
    pub medical_alerts: Vec<String>,
    pub referred_by: Option<String>,
    pub registered_date: NaiveDate,
    pub total_visits: u32,
    /// Balance carried from before the current ledger (e.g. migrated records).
    pub outstanding_due: Decimal,
    pub last_visit: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorStatus {
    Available,
    OnLeave,
    Busy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    pub availability: HashSet<Weekday>,
    pub status: DoctorStatus,
}

impl Doctor {
    pub fn works_on(&self, date: NaiveDate) -> bool {
        self.availability.contains(&date.weekday())
    }
}

/// Treatment catalog master entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: CatalogItemId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub duration_minutes: u32,
    pub active: bool,
}

/// What the engines need to know about a patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientSummary {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub outstanding_due: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorSummary {
    pub name: String,
    pub availability: HashSet<Weekday>,
}

/// Name and unit price used to fill an invoice line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub unit_price: Decimal,
}
