//! Configuration management for ClinicDesk
//!
//! Configuration is assembled from layered sources, later layers winning:
//!
//! 1. Built-in defaults ([`ClinicConfig::default`])
//! 2. An optional file (YAML, TOML or JSON, chosen by extension)
//! 3. Environment variables prefixed `CLINIC__`, sections separated by `__`
//!    (for example `CLINIC__BILLING__TAX_RATE_PERCENT=12`)
//!
//! The merged result is validated before it is handed out.
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .with_file("clinic.yaml")
//!     .load()?;
//! println!("tax rate: {}%", config.billing.tax_rate_percent);
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use error::*;
pub use loader::*;
pub use settings::*;
