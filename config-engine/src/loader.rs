use std::path::PathBuf;

use config::{Config, Environment, File};
use tracing::{debug, info};

use crate::error::Result;
use crate::settings::ClinicConfig;

/// Builds a [`ClinicConfig`] from defaults, an optional file and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: "CLINIC".to_string(),
        }
    }

    /// The file must exist once set.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<ClinicConfig> {
        let mut builder = Config::builder().add_source(Config::try_from(&ClinicConfig::default())?);

        if let Some(path) = &self.file {
            debug!(path = %path.display(), "adding configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: ClinicConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        info!(
            clinic = %config.clinic_name,
            tax_rate_percent = %config.billing.tax_rate_percent,
            locale = %config.billing.currency_locale,
            "configuration loaded"
        );
        Ok(config)
    }
}
