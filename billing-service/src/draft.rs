use clinic_directory::{CatalogItemId, PatientId, TreatmentCatalog};
use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{compute_totals, TaxRate};
use crate::error::{BillingError, BillingResult};
use crate::models::{Discount, InvoiceTotals, LineItem, PaymentMethod};

/// An invoice under construction.
///
/// Nothing is validated until [`InvoiceDraft::preview`] or finalization, so
/// a front desk can build the draft field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub patient_id: PatientId,
    pub items: Vec<LineItem>,
    pub discount: Discount,
    pub tax_enabled: bool,
    pub initial_payment: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
}

impl InvoiceDraft {
    /// Tax is enabled by default.
    pub fn new(patient_id: impl Into<PatientId>) -> Self {
        Self {
            patient_id: patient_id.into(),
            items: Vec::new(),
            discount: Discount::none(),
            tax_enabled: true,
            initial_payment: Decimal::ZERO,
            payment_method: None,
            notes: None,
        }
    }

    pub fn add_item(&mut self, item: LineItem) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Add a line filled with the catalog's current name and price.
    pub fn add_catalog_item(
        &mut self,
        catalog: &dyn TreatmentCatalog,
        catalog_item_id: &CatalogItemId,
        quantity: u32,
    ) -> BillingResult<&mut Self> {
        let entry = catalog
            .find_treatment(catalog_item_id)
            .ok_or_else(|| BillingError::UnknownCatalogItem(catalog_item_id.clone()))?;

        debug!(item = %catalog_item_id, price = %entry.unit_price, quantity, "adding catalog item to draft");
        self.items.push(LineItem {
            catalog_item_id: catalog_item_id.clone(),
            name: entry.name,
            unit_price: entry.unit_price,
            quantity,
        });
        Ok(self)
    }

    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn set_discount(&mut self, discount: Discount) -> &mut Self {
        self.discount = discount;
        self
    }

    pub fn set_tax_enabled(&mut self, enabled: bool) -> &mut Self {
        self.tax_enabled = enabled;
        self
    }

    /// Amount collected at the counter when the invoice is created.
    pub fn set_initial_payment(&mut self, amount: Decimal, method: PaymentMethod) -> &mut Self {
        self.initial_payment = amount;
        self.payment_method = Some(method);
        self
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) -> &mut Self {
        self.notes = Some(notes.into());
        self
    }

    /// Totals as they would appear on the finalized invoice.
    pub fn preview(&self, rate: TaxRate) -> BillingResult<InvoiceTotals> {
        compute_totals(&self.items, &self.discount, self.tax_enabled, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_directory::CatalogEntry;
    use rust_decimal_macros::dec;

    struct OneItemCatalog;

    impl TreatmentCatalog for OneItemCatalog {
        fn find_treatment(&self, id: &CatalogItemId) -> Option<CatalogEntry> {
            (id.as_str() == "T004").then(|| CatalogEntry {
                name: "Cavity Filling (Composite)".to_string(),
                unit_price: dec!(2000),
            })
        }
    }

    #[test]
    fn test_catalog_autofill() {
        let mut draft = InvoiceDraft::new("P003");
        draft
            .add_catalog_item(&OneItemCatalog, &"T004".into(), 2)
            .unwrap()
            .set_discount(Discount::absolute(dec!(200)));

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].name, "Cavity Filling (Composite)");
        let totals = draft.preview(TaxRate::default()).unwrap();
        assert_eq!(totals.total, dec!(4484));
    }

    #[test]
    fn test_unknown_catalog_item() {
        let mut draft = InvoiceDraft::new("P003");
        let err = draft.add_catalog_item(&OneItemCatalog, &"T999".into(), 1).unwrap_err();
        assert_eq!(err, BillingError::UnknownCatalogItem("T999".into()));
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_remove_item_out_of_range() {
        let mut draft = InvoiceDraft::new("P003");
        draft.add_item(LineItem::new("T020", "X-Ray (Single)", dec!(300), 1));
        assert!(draft.remove_item(3).is_none());
        assert_eq!(draft.remove_item(0).map(|i| i.name), Some("X-Ray (Single)".to_string()));
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_tax_toggle() {
        let mut draft = InvoiceDraft::new("P003");
        draft
            .add_item(LineItem::new("T001", "General Consultation", dec!(500), 1))
            .set_tax_enabled(false);
        assert_eq!(draft.preview(TaxRate::default()).unwrap().total, dec!(500));
    }
}
