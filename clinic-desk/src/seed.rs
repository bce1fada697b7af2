//! Sample clinic used by the CLI and by tests.
//!
//! The day is 2026-02-14, a Saturday. Everyone but Dr. Rohan Mehta's
//! morning is still to arrive.

use billing_service::{Discount, InvoiceDraft, LineItem, PaymentMethod};
use chrono::{Duration, NaiveDate, Weekday};
use clinic_directory::{ClinicDirectory, Doctor, DoctorStatus, Gender, Patient, Treatment};
use config_engine::ClinicConfig;
use rust_decimal::Decimal;
use scheduling_service::{parse_date, parse_time, BookingRequest};

use crate::desk::ClinicDesk;
use crate::error::DeskResult;

pub const SAMPLE_DAY: &str = "2026-02-14";

struct PatientRow {
    id: &'static str,
    name: &'static str,
    phone: &'static str,
    email: Option<&'static str>,
    age: u8,
    gender: Gender,
    blood_group: &'static str,
    address: &'static str,
    medical_alerts: &'static [&'static str],
    registered: &'static str,
    visits: u32,
    due: i64,
    last_visit: &'static str,
}

const PATIENTS: &[PatientRow] = &[
    PatientRow { id: "P001", name: "Rajesh Kumar", phone: "+91 98765 43210", email: None, age: 42, gender: Gender::Male, blood_group: "O+", address: "45, MG Road, Bengaluru, Karnataka - 560001", medical_alerts: &["Diabetes", "Hypertension"], registered: "2023-01-15", visits: 18, due: 5000, last_visit: "2026-02-10" },
    PatientRow { id: "P002", name: "Priya Sharma", phone: "+91 99887 76543", email: Some("priya.sharma@email.com"), age: 28, gender: Gender::Female, blood_group: "A+", address: "12, Koramangala, Bengaluru, Karnataka - 560034", medical_alerts: &[], registered: "2024-03-20", visits: 12, due: 0, last_visit: "2026-02-12" },
    PatientRow { id: "P003", name: "Amit Verma", phone: "+91 97654 32109", email: None, age: 35, gender: Gender::Male, blood_group: "B+", address: "78, Indiranagar, Bengaluru, Karnataka - 560038", medical_alerts: &["Allergic to Penicillin"], registered: "2023-06-10", visits: 15, due: 3500, last_visit: "2026-02-08" },
    PatientRow { id: "P004", name: "Sneha Reddy", phone: "+91 96543 21098", email: Some("sneha.reddy@email.com"), age: 31, gender: Gender::Female, blood_group: "AB+", address: "23, Jayanagar, Bengaluru, Karnataka - 560041", medical_alerts: &[], registered: "2024-01-05", visits: 8, due: 2000, last_visit: "2026-01-28" },
    PatientRow { id: "P005", name: "Arjun Nair", phone: "+91 95432 10987", email: None, age: 45, gender: Gender::Male, blood_group: "O-", address: "56, Whitefield, Bengaluru, Karnataka - 560066", medical_alerts: &["Asthma"], registered: "2023-09-12", visits: 10, due: 0, last_visit: "2026-02-05" },
    PatientRow { id: "P006", name: "Kavya Iyer", phone: "+91 94321 09876", email: None, age: 26, gender: Gender::Female, blood_group: "A-", address: "89, HSR Layout, Bengaluru, Karnataka - 560102", medical_alerts: &[], registered: "2024-05-18", visits: 6, due: 1500, last_visit: "2026-02-01" },
    PatientRow { id: "P007", name: "Vivek Patel", phone: "+91 93210 98765", email: None, age: 38, gender: Gender::Male, blood_group: "B-", address: "34, Marathahalli, Bengaluru, Karnataka - 560037", medical_alerts: &[], registered: "2023-11-22", visits: 14, due: 4200, last_visit: "2026-02-11" },
    PatientRow { id: "P008", name: "Neha Agarwal", phone: "+91 92109 87654", email: Some("neha.agarwal@email.com"), age: 29, gender: Gender::Female, blood_group: "O+", address: "67, Electronic City, Bengaluru, Karnataka - 560100", medical_alerts: &[], registered: "2024-02-14", visits: 9, due: 0, last_visit: "2026-02-09" },
    PatientRow { id: "P009", name: "Manish Yadav", phone: "+91 91098 76543", email: None, age: 33, gender: Gender::Male, blood_group: "AB-", address: "45, BTM Layout, Bengaluru, Karnataka - 560076", medical_alerts: &["High BP"], registered: "2023-07-30", visits: 11, due: 2800, last_visit: "2026-02-07" },
    PatientRow { id: "P010", name: "Divya Krishnan", phone: "+91 90987 65432", email: None, age: 27, gender: Gender::Female, blood_group: "A+", address: "12, JP Nagar, Bengaluru, Karnataka - 560078", medical_alerts: &[], registered: "2024-04-08", visits: 7, due: 1000, last_visit: "2026-01-30" },
    PatientRow { id: "P011", name: "Sanjay Singh", phone: "+91 89876 54321", email: None, age: 50, gender: Gender::Male, blood_group: "B+", address: "78, Yelahanka, Bengaluru, Karnataka - 560064", medical_alerts: &["Diabetes"], registered: "2023-02-18", visits: 20, due: 0, last_visit: "2026-02-13" },
    PatientRow { id: "P012", name: "Anjali Deshmukh", phone: "+91 88765 43210", email: None, age: 24, gender: Gender::Female, blood_group: "O+", address: "23, Malleswaram, Bengaluru, Karnataka - 560003", medical_alerts: &[], registered: "2024-06-25", visits: 5, due: 3000, last_visit: "2026-02-06" },
    PatientRow { id: "P013", name: "Rahul Gupta", phone: "+91 87654 32109", email: None, age: 40, gender: Gender::Male, blood_group: "A-", address: "56, Rajajinagar, Bengaluru, Karnataka - 560010", medical_alerts: &[], registered: "2023-08-14", visits: 13, due: 5500, last_visit: "2026-02-04" },
];

// (id, name, category, price, minutes)
const TREATMENTS: &[(&str, &str, &str, i64, u32)] = &[
    ("T001", "General Consultation", "Consultation", 500, 15),
    ("T002", "Teeth Cleaning (Scaling)", "Preventive", 1500, 30),
    ("T003", "Teeth Whitening", "Cosmetic", 8000, 60),
    ("T004", "Cavity Filling (Composite)", "Restorative", 2000, 30),
    ("T005", "Root Canal Treatment", "Endodontics", 8500, 90),
    ("T006", "Tooth Extraction (Simple)", "Oral Surgery", 1500, 30),
    ("T007", "Tooth Extraction (Surgical)", "Oral Surgery", 4000, 60),
    ("T008", "Crown (Porcelain)", "Restorative", 6500, 45),
    ("T009", "Bridge (3 unit)", "Restorative", 18000, 90),
    ("T010", "Dentures (Partial)", "Prosthetics", 12000, 60),
    ("T011", "Dentures (Full)", "Prosthetics", 25000, 90),
    ("T012", "Braces (Metal)", "Orthodontics", 45000, 120),
    ("T013", "Braces (Ceramic)", "Orthodontics", 65000, 120),
    ("T014", "Invisalign", "Orthodontics", 180000, 120),
    ("T015", "Dental Implant", "Implantology", 35000, 120),
    ("T016", "Wisdom Tooth Removal", "Oral Surgery", 5000, 60),
    ("T017", "Gum Treatment (Deep Cleaning)", "Periodontics", 3500, 60),
    ("T018", "Fluoride Treatment", "Preventive", 800, 15),
    ("T019", "Sealants", "Preventive", 1200, 20),
    ("T020", "X-Ray (Single)", "Diagnostics", 300, 10),
    ("T021", "X-Ray (Full Mouth)", "Diagnostics", 1200, 15),
];

#[derive(Clone, Copy)]
enum Arrival {
    Expected,
    Waiting,
    Seen,
}

// (patient, doctor, time, visit type, walk-in, arrival)
const APPOINTMENTS: &[(&str, &str, &str, &str, bool, Arrival)] = &[
    ("P001", "D001", "09:00", "Root Canal Follow-up", false, Arrival::Seen),
    ("P002", "D002", "09:30", "Teeth Cleaning", false, Arrival::Waiting),
    ("P003", "D001", "10:00", "Braces Adjustment", false, Arrival::Seen),
    ("P004", "D002", "10:30", "Tooth Extraction", false, Arrival::Waiting),
    ("P005", "D001", "11:00", "Consultation", true, Arrival::Waiting),
    ("P007", "D002", "11:30", "Root Canal - Session 2", false, Arrival::Expected),
    ("P008", "D001", "12:00", "Teeth Whitening", false, Arrival::Expected),
    ("P009", "D002", "14:00", "Cavity Filling", false, Arrival::Expected),
    ("P011", "D001", "14:30", "Denture Fitting", false, Arrival::Expected),
    ("P012", "D002", "15:00", "Scaling & Polishing", false, Arrival::Expected),
    ("P013", "D001", "15:30", "Crown Installation", false, Arrival::Expected),
];

/// Doctors, the first thirteen patients and the full treatment catalog.
pub fn sample_directory() -> DeskResult<ClinicDirectory> {
    use Weekday::*;

    let mut directory = ClinicDirectory::new();

    for (id, name, specialty, days, status) in [
        ("D001", "Dr. Nishat Ahmed", "Orthodontist & Cosmetic Dentistry", &[Mon, Tue, Wed, Thu, Fri, Sat][..], DoctorStatus::Available),
        ("D002", "Dr. Rohan Mehta", "Endodontist & Root Canal Specialist", &[Mon, Wed, Fri, Sat][..], DoctorStatus::Available),
        ("D003", "Dr. Ayesha Khan", "Pediatric Dentistry", &[Tue, Thu, Sat][..], DoctorStatus::OnLeave),
    ] {
        directory.add_doctor(Doctor {
            id: id.into(),
            name: name.to_string(),
            specialty: specialty.to_string(),
            availability: days.iter().copied().collect(),
            status,
        });
    }

    for row in PATIENTS {
        directory.add_patient(Patient {
            id: row.id.into(),
            name: row.name.to_string(),
            phone: row.phone.to_string(),
            alternate_phone: None,
            email: row.email.map(str::to_string),
            age: row.age,
            gender: row.gender,
            blood_group: Some(row.blood_group.to_string()),
            address: row.address.to_string(),
            medical_alerts: row.medical_alerts.iter().map(|a| a.to_string()).collect(),
            referred_by: None,
            registered_date: parse_date(row.registered)?,
            total_visits: row.visits,
            outstanding_due: Decimal::from(row.due),
            last_visit: Some(parse_date(row.last_visit)?),
            notes: None,
        });
    }

    for &(id, name, category, price, minutes) in TREATMENTS {
        directory.add_treatment(Treatment {
            id: id.into(),
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::from(price),
            duration_minutes: minutes,
            active: true,
        });
    }

    Ok(directory)
}

/// The sample directory with the day's appointments, queue, ledger and
/// follow-ups already in place.
pub fn sample_desk(config: ClinicConfig) -> DeskResult<ClinicDesk> {
    let mut desk = ClinicDesk::new(config, sample_directory()?)?;
    let day = parse_date(SAMPLE_DAY)?;

    for &(patient, doctor, time, visit_type, walk_in, arrival) in APPOINTMENTS {
        let mut request = BookingRequest::new(patient, doctor, SAMPLE_DAY, time, visit_type);
        if walk_in {
            request = request.walk_in();
        }
        let appointment = desk.book(request)?;

        if matches!(arrival, Arrival::Waiting | Arrival::Seen) {
            let arrived = day.and_time(parse_time(time)?) - Duration::minutes(5);
            desk.check_in(appointment.id(), arrived)?;
        }
        if matches!(arrival, Arrival::Seen) {
            desk.complete_visit(appointment.id(), day)?;
        }
    }

    seed_invoices(&mut desk)?;
    seed_follow_ups(&mut desk)?;
    Ok(desk)
}

fn seed_invoices(desk: &mut ClinicDesk) -> DeskResult<()> {
    // `None` settles the invoice in full at whatever the configured tax
    // rate makes the total.
    struct Sale {
        patient: &'static str,
        issued: &'static str,
        item: (&'static str, Option<(&'static str, i64)>, u32),
        discount: i64,
        paid: Option<Option<i64>>,
        method: PaymentMethod,
    }

    let sales = [
        Sale { patient: "P001", issued: "2026-02-10", item: ("T005", None, 1), discount: 500, paid: Some(Some(4440)), method: PaymentMethod::Upi },
        Sale { patient: "P002", issued: "2026-02-12", item: ("T003", None, 1), discount: 0, paid: Some(None), method: PaymentMethod::Card },
        Sale { patient: "P003", issued: "2026-02-08", item: ("T012-ADJ", Some(("Braces Adjustment", 2000)), 1), discount: 0, paid: None, method: PaymentMethod::Cash },
        Sale { patient: "P004", issued: "2026-01-28", item: ("T004", None, 2), discount: 200, paid: Some(Some(2484)), method: PaymentMethod::Cash },
        Sale { patient: "P007", issued: "2026-02-11", item: ("T005-S1", Some(("Root Canal Treatment - Session 1", 4250)), 1), discount: 0, paid: Some(None), method: PaymentMethod::Upi },
    ];

    for sale in sales {
        let mut draft = InvoiceDraft::new(sale.patient);
        let (item_id, custom, quantity) = sale.item;
        match custom {
            Some((name, price)) => {
                draft.add_item(LineItem::new(item_id, name, Decimal::from(price), quantity));
            }
            None => {
                draft.add_catalog_item(desk.directory(), &item_id.into(), quantity)?;
            }
        }
        if sale.discount > 0 {
            draft.set_discount(Discount::absolute(Decimal::from(sale.discount)));
        }
        if let Some(paid) = sale.paid {
            let amount = match paid {
                Some(amount) => Decimal::from(amount),
                None => draft.preview(desk.billing().tax_rate())?.total,
            };
            draft.set_initial_payment(amount, sale.method);
        }
        desk.create_invoice(draft, parse_date(sale.issued)?)?;
    }
    Ok(())
}

fn seed_follow_ups(desk: &mut ClinicDesk) -> DeskResult<()> {
    #[derive(Clone, Copy)]
    enum Reminder {
        Pending,
        Sent,
        Confirmed,
    }

    for (patient, date, reason, notes, reminder) in [
        ("P001", "2026-02-20", "Crown Installation", Some("Crown ready for installation"), Reminder::Pending),
        ("P007", "2026-02-21", "Root Canal - Session 3", None, Reminder::Sent),
        ("P003", "2026-03-14", "Braces Adjustment", None, Reminder::Confirmed),
        ("P013", "2026-03-01", "Dental Implant Surgery", None, Reminder::Pending),
        ("P012", "2026-02-18", "Post-extraction checkup", None, Reminder::Pending),
        ("P006", "2026-02-15", "Crown fitting check", None, Reminder::Sent),
        ("P004", "2026-02-28", "Follow-up checkup", None, Reminder::Pending),
        ("P009", "2026-02-17", "Post-extraction checkup", None, Reminder::Sent),
    ] {
        let follow_up = desk.schedule_follow_up(
            patient.into(),
            parse_date(date)?,
            reason,
            notes.map(str::to_string),
        )?;

        let book = desk.follow_ups_mut();
        if matches!(reminder, Reminder::Sent | Reminder::Confirmed) {
            book.mark_sent(follow_up.id)?;
        }
        if matches!(reminder, Reminder::Confirmed) {
            book.mark_confirmed(follow_up.id)?;
        }
    }
    Ok(())
}

/// Date the sample data is built around.
pub fn sample_day() -> DeskResult<NaiveDate> {
    Ok(parse_date(SAMPLE_DAY)?)
}
