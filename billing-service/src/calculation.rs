//! The invoice engine.
//!
//! Every function here is referentially transparent. The `compute_*`
//! functions validate their inputs and are what callers use on untrusted
//! data; the crate-private helpers below them assume validated input and are
//! what a finalized [`Invoice`](crate::Invoice) uses to recompute its figures.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BillingError, BillingResult};
use crate::models::{Discount, DiscountKind, InvoiceStatus, InvoiceTotals, LineItem};

/// Tax rate as a percentage, e.g. `18` for 18%. Always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Rates outside `[0, 100]` are clamped to the nearest bound.
    pub fn from_percent(percent: Decimal) -> Self {
        Self(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }

    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        Self(Decimal::from(18))
    }
}

/// Largest subtotal a single invoice may carry.
pub fn max_subtotal() -> Decimal {
    Decimal::new(1_000_000_000_000_000, 0)
}

/// Sum of `unit_price * quantity` over all items.
///
/// Fails with `InvalidQuantity` for a zero quantity and `InvalidPrice` for a
/// negative unit price or one that takes the running sum past
/// [`max_subtotal`]. Lines are numbered from 1 in the error.
pub fn compute_subtotal(items: &[LineItem]) -> BillingResult<Decimal> {
    let mut subtotal = Decimal::ZERO;
    for (idx, item) in items.iter().enumerate() {
        if item.quantity < 1 {
            return Err(BillingError::InvalidQuantity {
                line: idx + 1,
                quantity: item.quantity,
            });
        }
        if item.unit_price < Decimal::ZERO {
            return Err(BillingError::InvalidPrice {
                line: idx + 1,
                unit_price: item.unit_price,
            });
        }
        subtotal = item
            .unit_price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|amount| subtotal.checked_add(amount))
            .filter(|sum| *sum <= max_subtotal())
            .ok_or(BillingError::InvalidPrice {
                line: idx + 1,
                unit_price: item.unit_price,
            })?;
    }
    Ok(subtotal)
}

/// Discount amount, always within `[0, subtotal]`.
///
/// Percent discounts above 100 are clamped rather than rejected; a negative
/// value in either kind fails with `InvalidDiscount`.
pub fn compute_discount(subtotal: Decimal, discount: &Discount) -> BillingResult<Decimal> {
    if discount.value < Decimal::ZERO {
        return Err(BillingError::InvalidDiscount {
            value: discount.value,
        });
    }
    Ok(clamp_discount(subtotal, discount))
}

/// `base * rate` when tax is enabled, zero otherwise.
pub fn compute_tax(base: Decimal, tax_enabled: bool, rate: TaxRate) -> Decimal {
    tax_on(base, tax_enabled, rate)
}

/// `subtotal - discount_amount + tax_amount`
pub fn compute_total(subtotal: Decimal, discount_amount: Decimal, tax_amount: Decimal) -> Decimal {
    subtotal - discount_amount + tax_amount
}

/// Payment status for a total and the amount paid against it.
///
/// A zero-value invoice with nothing paid is `Paid`: nothing is owed, so it
/// must not show up as outstanding.
pub fn derive_status(total: Decimal, amount_paid: Decimal) -> InvoiceStatus {
    if amount_paid >= total {
        InvoiceStatus::Paid
    } else if amount_paid.is_zero() {
        InvoiceStatus::Pending
    } else {
        InvoiceStatus::PartiallyPaid
    }
}

/// All figures for a set of items, with full validation.
pub fn compute_totals(
    items: &[LineItem],
    discount: &Discount,
    tax_enabled: bool,
    rate: TaxRate,
) -> BillingResult<InvoiceTotals> {
    let subtotal = compute_subtotal(items)?;
    let discount_amount = compute_discount(subtotal, discount)?;
    let tax = compute_tax(subtotal - discount_amount, tax_enabled, rate);
    let total = compute_total(subtotal, discount_amount, tax);

    debug!(
        %subtotal,
        discount = %discount_amount,
        %tax,
        %total,
        lines = items.len(),
        "computed invoice totals"
    );

    Ok(InvoiceTotals {
        subtotal,
        discount: discount_amount,
        tax,
        total,
    })
}

pub(crate) fn line_sum(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.amount()))
}

pub(crate) fn clamp_discount(subtotal: Decimal, discount: &Discount) -> Decimal {
    let raw = match discount.kind {
        DiscountKind::Percent => {
            let fraction = discount.value.min(Decimal::ONE_HUNDRED) / Decimal::ONE_HUNDRED;
            round_money(subtotal * fraction)
        }
        DiscountKind::Absolute => discount.value,
    };
    raw.min(subtotal).max(Decimal::ZERO)
}

pub(crate) fn tax_on(base: Decimal, tax_enabled: bool, rate: TaxRate) -> Decimal {
    if tax_enabled {
        round_money(base * rate.fraction())
    } else {
        Decimal::ZERO
    }
}

pub(crate) fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(unit_price: Decimal, quantity: u32) -> LineItem {
        LineItem::new("T001", "General Consultation", unit_price, quantity)
    }

    #[test]
    fn test_root_canal_full_price_with_tax() {
        let totals = compute_totals(
            &[item(dec!(8500), 1)],
            &Discount::percent(dec!(0)),
            true,
            TaxRate::default(),
        )
        .unwrap();

        assert_eq!(totals.subtotal, dec!(8500));
        assert_eq!(totals.discount, dec!(0));
        assert_eq!(totals.tax, dec!(1530));
        assert_eq!(totals.total, dec!(10030));
    }

    #[test]
    fn test_absolute_discount_reduces_tax_base() {
        let totals = compute_totals(
            &[item(dec!(2000), 2)],
            &Discount::absolute(dec!(200)),
            true,
            TaxRate::default(),
        )
        .unwrap();

        assert_eq!(totals.subtotal, dec!(4000));
        assert_eq!(totals.discount, dec!(200));
        assert_eq!(totals.tax, dec!(684));
        assert_eq!(totals.total, dec!(4484));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = compute_subtotal(&[item(dec!(500), 1), item(dec!(300), 0)]).unwrap_err();
        assert_eq!(err, BillingError::InvalidQuantity { line: 2, quantity: 0 });
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = compute_subtotal(&[item(dec!(-1), 1)]).unwrap_err();
        assert!(matches!(err, BillingError::InvalidPrice { line: 1, .. }));
    }

    #[test]
    fn test_free_item_allowed() {
        assert_eq!(compute_subtotal(&[item(dec!(0), 3)]).unwrap(), dec!(0));
        assert_eq!(compute_subtotal(&[]).unwrap(), dec!(0));
    }

    #[test]
    fn test_discount_clamping() {
        assert_eq!(
            compute_discount(dec!(1000), &Discount::percent(dec!(150))).unwrap(),
            dec!(1000)
        );
        assert_eq!(
            compute_discount(dec!(1000), &Discount::absolute(dec!(5000))).unwrap(),
            dec!(1000)
        );
        assert_eq!(
            compute_discount(dec!(1000), &Discount::percent(dec!(12.5))).unwrap(),
            dec!(125)
        );
    }

    #[test]
    fn test_huge_percent_clamps_to_subtotal() {
        assert_eq!(
            compute_discount(dec!(1000), &Discount::percent(Decimal::MAX)).unwrap(),
            dec!(1000)
        );
    }

    #[test]
    fn test_oversized_lines_rejected() {
        let err = compute_subtotal(&[item(Decimal::MAX, 2)]).unwrap_err();
        assert!(matches!(err, BillingError::InvalidPrice { line: 1, .. }));

        let near_limit = max_subtotal() - dec!(100);
        let err = compute_subtotal(&[item(near_limit, 1), item(dec!(500), 1)]).unwrap_err();
        assert!(matches!(err, BillingError::InvalidPrice { line: 2, .. }));

        assert_eq!(compute_subtotal(&[item(max_subtotal(), 1)]).unwrap(), max_subtotal());
    }

    #[test]
    fn test_negative_discount_rejected() {
        for discount in [Discount::percent(dec!(-5)), Discount::absolute(dec!(-0.01))] {
            assert!(matches!(
                compute_discount(dec!(1000), &discount),
                Err(BillingError::InvalidDiscount { .. })
            ));
        }
    }

    #[test]
    fn test_tax_disabled_and_custom_rate() {
        assert_eq!(compute_tax(dec!(1000), false, TaxRate::default()), dec!(0));
        assert_eq!(
            compute_tax(dec!(1000), true, TaxRate::from_percent(dec!(5))),
            dec!(50)
        );
        // 18% of 333.33 = 59.9994, rounded to paise
        assert_eq!(compute_tax(dec!(333.33), true, TaxRate::default()), dec!(60.00));
    }

    #[test]
    fn test_tax_rate_is_clamped() {
        assert_eq!(TaxRate::from_percent(dec!(-5)).percent(), dec!(0));
        assert_eq!(TaxRate::from_percent(dec!(250)).percent(), dec!(100));
        assert_eq!(TaxRate::from_percent(dec!(12.5)).percent(), dec!(12.5));
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(derive_status(dec!(0), dec!(0)), InvoiceStatus::Paid);
        assert_eq!(derive_status(dec!(9440), dec!(9440)), InvoiceStatus::Paid);
        assert_eq!(derive_status(dec!(9440), dec!(0)), InvoiceStatus::Pending);
        assert_eq!(derive_status(dec!(9440), dec!(4440)), InvoiceStatus::PartiallyPaid);
    }
}
