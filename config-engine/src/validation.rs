use rust_decimal::Decimal;

use crate::error::{ConfigError, Result};
use crate::settings::ClinicConfig;

impl ClinicConfig {
    /// Reject settings the engines cannot work with.
    pub fn validate(&self) -> Result<()> {
        let rate = self.billing.tax_rate_percent;
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(ConfigError::Validation(format!(
                "billing.tax_rate_percent must be within 0..=100, got {rate}"
            )));
        }

        if self.grid.start_hour >= self.grid.end_hour {
            return Err(ConfigError::Validation(format!(
                "grid.start_hour ({}) must be before grid.end_hour ({})",
                self.grid.start_hour, self.grid.end_hour
            )));
        }

        if self.grid.end_hour > 24 {
            return Err(ConfigError::Validation(format!(
                "grid.end_hour must be at most 24, got {}",
                self.grid.end_hour
            )));
        }

        if self.grid.slot_height == 0 {
            return Err(ConfigError::Validation(
                "grid.slot_height must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ClinicConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_tax() {
        let mut config = ClinicConfig::default();
        config.billing.tax_rate_percent = dec!(120);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.billing.tax_rate_percent = dec!(-1);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_rejects_inverted_grid() {
        let mut config = ClinicConfig::default();
        config.grid.start_hour = 19;
        config.grid.end_hour = 9;
        assert!(config.validate().is_err());

        let mut config = ClinicConfig::default();
        config.grid.end_hour = 25;
        assert!(config.validate().is_err());

        let mut config = ClinicConfig::default();
        config.grid.slot_height = 0;
        assert!(config.validate().is_err());
    }
}
