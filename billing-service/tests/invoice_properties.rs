//! Property tests for the invoice engine.

use billing_service::{
    compute_discount, compute_subtotal, compute_tax, compute_total, compute_totals, derive_status,
    Discount, InvoiceStatus, LineItem, TaxRate,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|paise| Decimal::new(paise, 2))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (money(), 1u32..20).prop_map(|(price, qty)| LineItem::new("T001", "Treatment", price, qty))
}

fn discount() -> impl Strategy<Value = Discount> {
    prop_oneof![
        (0i64..=10_000).prop_map(|bp| Discount::percent(Decimal::new(bp, 2))),
        money().prop_map(Discount::absolute),
    ]
}

proptest! {
    #[test]
    fn subtotal_is_sum_of_products_in_any_order(items in prop::collection::vec(line_item(), 0..12)) {
        let expected: Decimal = items
            .iter()
            .map(|i| i.unit_price * Decimal::from(i.quantity))
            .sum();

        let mut reversed = items.clone();
        reversed.reverse();

        prop_assert_eq!(compute_subtotal(&items).unwrap(), expected);
        prop_assert_eq!(compute_subtotal(&reversed).unwrap(), expected);
    }

    #[test]
    fn percent_discount_stays_within_subtotal(subtotal in money(), bp in 0i64..=10_000) {
        let amount = compute_discount(subtotal, &Discount::percent(Decimal::new(bp, 2))).unwrap();
        prop_assert!(amount >= Decimal::ZERO);
        prop_assert!(amount <= subtotal);
    }

    #[test]
    fn engine_totals_are_never_negative(
        items in prop::collection::vec(line_item(), 0..8),
        discount in discount(),
        tax_enabled in any::<bool>(),
    ) {
        let totals = compute_totals(&items, &discount, tax_enabled, TaxRate::default()).unwrap();
        prop_assert!(totals.total >= Decimal::ZERO);
        prop_assert!(totals.discount <= totals.subtotal);

        let base = totals.subtotal - totals.discount;
        let tax = compute_tax(base, tax_enabled, TaxRate::default());
        prop_assert_eq!(compute_total(totals.subtotal, totals.discount, tax), totals.total);
    }

    #[test]
    fn status_derivation_is_pure(total in money(), paid in money()) {
        prop_assert_eq!(derive_status(total, paid), derive_status(total, paid));
        if paid >= total {
            prop_assert_eq!(derive_status(total, paid), InvoiceStatus::Paid);
        }
    }
}

#[test]
fn zero_invoice_with_nothing_paid_is_paid() {
    assert_eq!(derive_status(dec!(0), dec!(0)), InvoiceStatus::Paid);
}

#[test]
fn exact_payment_is_paid() {
    assert_eq!(derive_status(dec!(4484), dec!(4484)), InvoiceStatus::Paid);
}
