use chrono::NaiveDate;
use clinic_directory::{CatalogItemId, PatientId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::calculation::{clamp_discount, derive_status, line_sum, tax_on, TaxRate};

/// One billable entry on an invoice draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub catalog_item_id: CatalogItemId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(
        catalog_item_id: impl Into<CatalogItemId>,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            catalog_item_id: catalog_item_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity`, saturating at `Decimal::MAX`.
    pub fn amount(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Percent,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: Decimal,
}

impl Discount {
    pub fn none() -> Self {
        Self::percent(Decimal::ZERO)
    }

    pub fn percent(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Percent,
            value,
        }
    }

    pub fn absolute(value: Decimal) -> Self {
        Self {
            kind: DiscountKind::Absolute,
            value,
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::none()
    }
}

/// Payment status, always derived from total and amount paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    PartiallyPaid,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::PartiallyPaid => "Partially Paid",
        })
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
    Insurance,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Insurance => "Insurance",
        })
    }
}

/// Money amounts computed for an invoice or a draft preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// A finalized invoice.
///
/// Only `amount_paid` (and the method of the latest payment) changes after
/// creation. Every money figure other than `amount_paid` is recomputed from
/// the line items on each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub(crate) id: Uuid,
    pub(crate) invoice_number: String,
    pub(crate) patient_id: PatientId,
    pub(crate) issue_date: NaiveDate,
    pub(crate) items: Vec<LineItem>,
    pub(crate) discount: Discount,
    pub(crate) tax_enabled: bool,
    pub(crate) tax_rate: TaxRate,
    pub(crate) amount_paid: Decimal,
    pub(crate) payment_method: Option<PaymentMethod>,
    pub(crate) notes: Option<String>,
}

impl Invoice {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn discount(&self) -> Discount {
        self.discount
    }

    pub fn tax_enabled(&self) -> bool {
        self.tax_enabled
    }

    /// Rate captured when the invoice was finalized.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn amount_paid(&self) -> Decimal {
        self.amount_paid
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    // Items and discount were validated at finalization, so the
    // infallible helpers are safe to use here.

    pub fn subtotal(&self) -> Decimal {
        line_sum(&self.items)
    }

    pub fn discount_amount(&self) -> Decimal {
        clamp_discount(self.subtotal(), &self.discount)
    }

    pub fn tax_amount(&self) -> Decimal {
        tax_on(
            self.subtotal() - self.discount_amount(),
            self.tax_enabled,
            self.tax_rate,
        )
    }

    pub fn total(&self) -> Decimal {
        self.totals().total
    }

    pub fn totals(&self) -> InvoiceTotals {
        let subtotal = self.subtotal();
        let discount = clamp_discount(subtotal, &self.discount);
        let tax = tax_on(subtotal - discount, self.tax_enabled, self.tax_rate);
        InvoiceTotals {
            subtotal,
            discount,
            tax,
            total: subtotal - discount + tax,
        }
    }

    /// `max(0, total - amount_paid)`
    pub fn balance_due(&self) -> Decimal {
        (self.total() - self.amount_paid).max(Decimal::ZERO)
    }

    pub fn status(&self) -> InvoiceStatus {
        derive_status(self.total(), self.amount_paid)
    }
}
