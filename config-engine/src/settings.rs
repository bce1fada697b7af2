use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level clinic configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub clinic_name: String,
    pub billing: BillingConfig,
    pub scheduling: SchedulingConfig,
    pub grid: GridConfig,
    pub logging: LoggingConfig,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            clinic_name: "Dental Clinic".to_string(),
            billing: BillingConfig::default(),
            scheduling: SchedulingConfig::default(),
            grid: GridConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Invoice engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Percentage applied when tax is enabled on an invoice.
    pub tax_rate_percent: Decimal,
    /// Display locale only. Never affects computed amounts.
    pub currency_locale: String,
    pub currency_symbol: String,
    /// Leading segment of invoice numbers, e.g. `DN` in `DN-2026-001`.
    pub invoice_prefix: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            tax_rate_percent: Decimal::from(18),
            currency_locale: "en-IN".to_string(),
            currency_symbol: "₹".to_string(),
            invoice_prefix: "DN".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Minutes after the booked time before a `Scheduled` visit counts as a no-show.
    pub no_show_grace_minutes: u32,
    /// Used for the waiting-time estimate in the check-in queue.
    pub average_consultation_minutes: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            no_show_grace_minutes: 30,
            average_consultation_minutes: 15,
        }
    }
}

/// Calendar slot grid. Hours are `[start_hour, end_hour)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 19,
            slot_height: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
