//! Common error handling utilities for ClinicDesk
//!
//! Every domain crate in the workspace owns its own `thiserror` enum. This
//! crate provides the pieces those enums share so the front desk can treat
//! them uniformly:
//!
//! - **Error Codes**: stable, machine-readable codes per failure kind
//! - **`CodedError`**: the trait each domain error implements
//! - **Context**: lightweight key/value context attached when logging
//!
//! The core never produces user-facing text. Callers translate a code into
//! whatever message their surface needs.
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, CodedError, ErrorContext};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("quantity must be at least 1")]
//! struct BadQuantity;
//!
//! impl CodedError for BadQuantity {
//!     fn code(&self) -> &'static str {
//!         codes::billing::INVALID_QUANTITY
//!     }
//! }
//!
//! let context = ErrorContext::new("compute_subtotal").add_context("line", "2");
//! error_common::log_error(&context, &BadQuantity);
//! assert_eq!(BadQuantity.code(), "BILLING_5001");
//! ```

pub mod codes;
pub mod context;
pub mod types;

pub use context::*;
pub use types::*;
