use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{BillingError, BillingResult, PaymentRejection};
use crate::models::{Invoice, PaymentMethod};

/// Record a payment against an invoice.
///
/// Returns the updated invoice and leaves the input untouched. Amounts that
/// are not positive, or that would take `amount_paid` past the total, are
/// rejected with `InvalidPayment`: overpayment is never silently capped.
pub fn apply_payment(invoice: &Invoice, amount: Decimal) -> BillingResult<Invoice> {
    if amount <= Decimal::ZERO {
        warn!(invoice = %invoice.invoice_number, %amount, "non-positive payment rejected");
        return Err(BillingError::InvalidPayment {
            amount,
            reason: PaymentRejection::NotPositive,
        });
    }

    if amount > invoice.balance_due() {
        warn!(
            invoice = %invoice.invoice_number,
            %amount,
            balance_due = %invoice.balance_due(),
            "overpayment rejected"
        );
        return Err(BillingError::InvalidPayment {
            amount,
            reason: PaymentRejection::ExceedsBalance,
        });
    }

    let mut updated = invoice.clone();
    updated.amount_paid += amount;

    info!(
        invoice = %updated.invoice_number,
        %amount,
        amount_paid = %updated.amount_paid,
        status = ?updated.status(),
        "payment applied"
    );
    Ok(updated)
}

impl Invoice {
    /// [`apply_payment`] that also records the method used.
    pub fn with_payment(&self, amount: Decimal, method: PaymentMethod) -> BillingResult<Invoice> {
        let mut updated = apply_payment(self, amount)?;
        updated.payment_method = Some(method);
        Ok(updated)
    }
}
