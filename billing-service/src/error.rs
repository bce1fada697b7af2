use clinic_directory::{CatalogItemId, PatientId};
use error_common::{codes, CodedError};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    #[error("Invalid quantity {quantity} on line {line}: must be at least 1")]
    InvalidQuantity { line: usize, quantity: u32 },

    #[error("Invalid unit price {unit_price} on line {line}: negative or over the invoice limit")]
    InvalidPrice { line: usize, unit_price: Decimal },

    #[error("Invalid discount value {value}: must not be negative")]
    InvalidDiscount { value: Decimal },

    #[error("Invalid payment of {amount}: {reason}")]
    InvalidPayment { amount: Decimal, reason: PaymentRejection },

    #[error("Invoice draft has no line items")]
    EmptyDraft,

    #[error("Unknown patient: {0}")]
    UnknownPatient(PatientId),

    #[error("Unknown or inactive catalog item: {0}")]
    UnknownCatalogItem(CatalogItemId),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),
}

/// Why a payment amount was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentRejection {
    NotPositive,
    Negative,
    ExceedsBalance,
}

impl std::fmt::Display for PaymentRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentRejection::NotPositive => "amount must be positive",
            PaymentRejection::Negative => "amount must not be negative",
            PaymentRejection::ExceedsBalance => "amount exceeds the balance due",
        })
    }
}

impl CodedError for BillingError {
    fn code(&self) -> &'static str {
        match self {
            BillingError::InvalidQuantity { .. } => codes::billing::INVALID_QUANTITY,
            BillingError::InvalidPrice { .. } => codes::billing::INVALID_PRICE,
            BillingError::InvalidDiscount { .. } => codes::billing::INVALID_DISCOUNT,
            BillingError::InvalidPayment { .. } => codes::billing::INVALID_PAYMENT,
            BillingError::EmptyDraft => codes::billing::EMPTY_DRAFT,
            BillingError::UnknownPatient(_) => codes::lookup::UNKNOWN_PATIENT,
            BillingError::UnknownCatalogItem(_) => codes::lookup::UNKNOWN_CATALOG_ITEM,
            BillingError::InvoiceNotFound(_) => codes::lookup::NOT_FOUND,
        }
    }

    fn is_validation(&self) -> bool {
        !matches!(self, BillingError::InvoiceNotFound(_))
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
