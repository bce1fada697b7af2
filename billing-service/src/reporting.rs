use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Invoice, InvoiceStatus};

/// Revenue report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub invoice_count: usize,
    pub total_billed: Decimal,
    pub collections: Decimal,
    pub outstanding: Decimal,
    pub paid_count: usize,
    pub partially_paid_count: usize,
    pub pending_count: usize,
    pub by_service: Vec<ServiceRevenue>,
    pub daily: Vec<DailyRevenue>,
}

/// Service-level revenue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRevenue {
    pub name: String,
    pub quantity: u32,
    /// Line amounts before invoice-level discount and tax.
    pub total_charges: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub billed: Decimal,
    pub collected: Decimal,
}

impl RevenueReport {
    /// Summarize invoices issued within `[period_start, period_end]`.
    pub fn build<'a>(
        invoices: impl IntoIterator<Item = &'a Invoice>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Self {
        let mut report = RevenueReport {
            period_start,
            period_end,
            invoice_count: 0,
            total_billed: Decimal::ZERO,
            collections: Decimal::ZERO,
            outstanding: Decimal::ZERO,
            paid_count: 0,
            partially_paid_count: 0,
            pending_count: 0,
            by_service: Vec::new(),
            daily: Vec::new(),
        };

        let mut services: HashMap<&str, (u32, Decimal)> = HashMap::new();
        let mut daily: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

        for invoice in invoices {
            if invoice.issue_date < period_start || invoice.issue_date > period_end {
                continue;
            }

            let total = invoice.total();
            report.invoice_count += 1;
            report.total_billed += total;
            report.collections += invoice.amount_paid;
            report.outstanding += invoice.balance_due();

            match invoice.status() {
                InvoiceStatus::Paid => report.paid_count += 1,
                InvoiceStatus::PartiallyPaid => report.partially_paid_count += 1,
                InvoiceStatus::Pending => report.pending_count += 1,
            }

            for item in &invoice.items {
                let entry = services.entry(item.name.as_str()).or_insert((0, Decimal::ZERO));
                entry.0 += item.quantity;
                entry.1 += item.amount();
            }

            let day = daily.entry(invoice.issue_date).or_insert((Decimal::ZERO, Decimal::ZERO));
            day.0 += total;
            day.1 += invoice.amount_paid;
        }

        report.by_service = services
            .into_iter()
            .map(|(name, (quantity, total_charges))| ServiceRevenue {
                name: name.to_string(),
                quantity,
                total_charges,
            })
            .collect();
        report.by_service.sort_by(|a, b| {
            b.total_charges
                .cmp(&a.total_charges)
                .then_with(|| a.name.cmp(&b.name))
        });

        report.daily = daily
            .into_iter()
            .map(|(date, (billed, collected))| DailyRevenue {
                date,
                billed,
                collected,
            })
            .collect();

        report
    }
}
