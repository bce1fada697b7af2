use chrono::{Datelike, NaiveDate};
use clinic_directory::{PatientId, PatientLookup};
use config_engine::BillingConfig;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::TaxRate;
use crate::draft::InvoiceDraft;
use crate::error::{BillingError, BillingResult, PaymentRejection};
use crate::models::{Invoice, PaymentMethod};
use crate::numbering::InvoiceNumbering;

/// Billing service
///
/// Finalizes drafts into invoices and keeps them in issue order. Callers
/// serialize access; the service holds no locks.
#[derive(Debug, Clone)]
pub struct BillingService {
    tax_rate: TaxRate,
    numbering: InvoiceNumbering,
    invoices: Vec<Invoice>,
    index: HashMap<Uuid, usize>,
}

impl Default for BillingService {
    fn default() -> Self {
        Self::new(TaxRate::default(), "INV")
    }
}

impl BillingService {
    /// Create a new billing service
    pub fn new(tax_rate: TaxRate, invoice_prefix: impl Into<String>) -> Self {
        Self {
            tax_rate,
            numbering: InvoiceNumbering::new(invoice_prefix),
            invoices: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(
            TaxRate::from_percent(config.tax_rate_percent),
            config.invoice_prefix.clone(),
        )
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Turn a draft into an invoice issued on `issue_date`.
    ///
    /// Nothing is stored and no invoice number is consumed unless every
    /// check passes.
    pub fn finalize(
        &mut self,
        draft: InvoiceDraft,
        patients: &dyn PatientLookup,
        issue_date: NaiveDate,
    ) -> BillingResult<Invoice> {
        if draft.items.is_empty() {
            return Err(BillingError::EmptyDraft);
        }

        if patients.find_patient(&draft.patient_id).is_none() {
            warn!(patient_id = %draft.patient_id, "invoice for unknown patient rejected");
            return Err(BillingError::UnknownPatient(draft.patient_id));
        }

        let totals = draft.preview(self.tax_rate)?;

        if draft.initial_payment < Decimal::ZERO {
            return Err(BillingError::InvalidPayment {
                amount: draft.initial_payment,
                reason: PaymentRejection::Negative,
            });
        }
        if draft.initial_payment > totals.total {
            return Err(BillingError::InvalidPayment {
                amount: draft.initial_payment,
                reason: PaymentRejection::ExceedsBalance,
            });
        }

        let invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_number: self.numbering.next(issue_date.year()),
            patient_id: draft.patient_id,
            issue_date,
            items: draft.items,
            discount: draft.discount,
            tax_enabled: draft.tax_enabled,
            tax_rate: self.tax_rate,
            amount_paid: draft.initial_payment,
            payment_method: draft.payment_method,
            notes: draft.notes,
        };

        info!(
            invoice = %invoice.invoice_number,
            patient_id = %invoice.patient_id,
            total = %totals.total,
            amount_paid = %invoice.amount_paid,
            "invoice created"
        );

        self.index.insert(invoice.id, self.invoices.len());
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// Apply a payment to a stored invoice.
    pub fn record_payment(
        &mut self,
        invoice_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
    ) -> BillingResult<Invoice> {
        let slot = self
            .index
            .get(&invoice_id)
            .and_then(|&pos| self.invoices.get_mut(pos))
            .ok_or(BillingError::InvoiceNotFound(invoice_id))?;

        let updated = slot.with_payment(amount, method)?;
        *slot = updated.clone();
        Ok(updated)
    }

    pub fn get(&self, invoice_id: Uuid) -> Option<&Invoice> {
        self.index.get(&invoice_id).and_then(|&pos| self.invoices.get(pos))
    }

    pub fn find_by_number(&self, invoice_number: &str) -> Option<&Invoice> {
        self.invoices.iter().find(|i| i.invoice_number == invoice_number)
    }

    /// Every invoice in issue order.
    pub fn all(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn invoices_for_patient<'a>(
        &'a self,
        patient_id: &'a PatientId,
    ) -> impl Iterator<Item = &'a Invoice> + 'a {
        self.invoices.iter().filter(move |i| &i.patient_id == patient_id)
    }

    /// Sum of balance due over the patient's invoices.
    pub fn outstanding_for_patient(&self, patient_id: &PatientId) -> Decimal {
        self.invoices_for_patient(patient_id).map(Invoice::balance_due).sum()
    }

    /// Sum of balance due over every invoice.
    pub fn total_outstanding(&self) -> Decimal {
        self.invoices.iter().map(Invoice::balance_due).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Discount, InvoiceStatus, LineItem};
    use clinic_directory::PatientSummary;
    use rust_decimal_macros::dec;

    struct Registry;

    impl PatientLookup for Registry {
        fn find_patient(&self, id: &PatientId) -> Option<PatientSummary> {
            (id.as_str() == "P001").then(|| PatientSummary {
                name: "Rajesh Kumar".to_string(),
                phone: "+91 98765 43210".to_string(),
                email: None,
                outstanding_due: Decimal::ZERO,
            })
        }
    }

    fn root_canal_draft() -> InvoiceDraft {
        let mut draft = InvoiceDraft::new("P001");
        draft
            .add_item(LineItem::new("T005", "Root Canal Treatment", dec!(8500), 1))
            .set_discount(Discount::absolute(dec!(500)));
        draft
    }

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    #[test]
    fn test_finalize_and_partial_payment() {
        let mut billing = BillingService::new(TaxRate::default(), "DN");
        let mut draft = root_canal_draft();
        draft.set_initial_payment(dec!(4440), PaymentMethod::Upi);

        let invoice = billing.finalize(draft, &Registry, issue_date()).unwrap();
        assert_eq!(invoice.invoice_number(), "DN-2026-001");
        assert_eq!(invoice.total(), dec!(9440));
        assert_eq!(invoice.tax_amount(), dec!(1440));
        assert_eq!(invoice.status(), InvoiceStatus::PartiallyPaid);
        assert_eq!(billing.outstanding_for_patient(&"P001".into()), dec!(5000));

        let paid = billing
            .record_payment(invoice.id(), dec!(5000), PaymentMethod::Cash)
            .unwrap();
        assert_eq!(paid.status(), InvoiceStatus::Paid);
        assert_eq!(paid.payment_method(), Some(PaymentMethod::Cash));
        assert_eq!(billing.get(invoice.id()).unwrap().balance_due(), dec!(0));
        assert_eq!(billing.total_outstanding(), dec!(0));
    }

    #[test]
    fn test_rejected_payment_leaves_invoice_unchanged() {
        let mut billing = BillingService::new(TaxRate::default(), "DN");
        let invoice = billing.finalize(root_canal_draft(), &Registry, issue_date()).unwrap();

        let err = billing
            .record_payment(invoice.id(), dec!(10000), PaymentMethod::Card)
            .unwrap_err();
        assert!(matches!(
            err,
            BillingError::InvalidPayment { reason: PaymentRejection::ExceedsBalance, .. }
        ));
        assert_eq!(billing.get(invoice.id()), Some(&invoice));
    }

    #[test]
    fn test_finalize_validation_consumes_no_number() {
        let mut billing = BillingService::new(TaxRate::default(), "DN");

        assert_eq!(
            billing.finalize(InvoiceDraft::new("P001"), &Registry, issue_date()),
            Err(BillingError::EmptyDraft)
        );

        let mut stranger = root_canal_draft();
        stranger.patient_id = "P404".into();
        assert!(matches!(
            billing.finalize(stranger, &Registry, issue_date()),
            Err(BillingError::UnknownPatient(_))
        ));

        let mut overpaid = root_canal_draft();
        overpaid.set_initial_payment(dec!(9440.01), PaymentMethod::Cash);
        assert!(matches!(
            billing.finalize(overpaid, &Registry, issue_date()),
            Err(BillingError::InvalidPayment { .. })
        ));

        assert!(billing.all().is_empty());
        let invoice = billing.finalize(root_canal_draft(), &Registry, issue_date()).unwrap();
        assert_eq!(invoice.invoice_number(), "DN-2026-001");
    }

    #[test]
    fn test_unknown_invoice() {
        let mut billing = BillingService::default();
        let id = Uuid::new_v4();
        assert_eq!(
            billing.record_payment(id, dec!(1), PaymentMethod::Cash),
            Err(BillingError::InvoiceNotFound(id))
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = BillingConfig::default();
        config.tax_rate_percent = dec!(5);
        config.invoice_prefix = "SC".to_string();
        let billing = BillingService::from_config(&config);
        assert_eq!(billing.tax_rate().percent(), dec!(5));
    }
}
