// Patient-facing message text
use billing_service::{format_amount, CurrencyFormat, Invoice, InvoiceStatus};
use scheduling_service::FollowUp;

pub fn follow_up_reminder(clinic_name: &str, patient_name: &str, follow_up: &FollowUp) -> String {
    format!(
        "Dear {patient_name}, this is a reminder from {clinic_name} for your {} on {}. Reply to confirm.",
        follow_up.reason,
        follow_up.next_visit_date.format("%d %b %Y"),
    )
}

pub fn invoice_receipt(
    clinic_name: &str,
    patient_name: &str,
    invoice: &Invoice,
    currency: &CurrencyFormat,
) -> String {
    let total = format_amount(invoice.total(), currency);
    match invoice.status() {
        InvoiceStatus::Paid => format!(
            "Dear {patient_name}, we received {total} for invoice {} at {clinic_name}. Thank you.",
            invoice.invoice_number(),
        ),
        InvoiceStatus::PartiallyPaid | InvoiceStatus::Pending => format!(
            "Dear {patient_name}, invoice {} from {clinic_name}: total {total}, paid {}, balance due {}.",
            invoice.invoice_number(),
            format_amount(invoice.amount_paid(), currency),
            format_amount(invoice.balance_due(), currency),
        ),
    }
}
