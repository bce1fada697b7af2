//! Outbound patient messaging for the front desk
//!
//! Follow-up reminders and invoice receipts leave the clinic through a
//! [`NotificationDispatcher`]. Delivery is fire-and-forget: a dispatcher
//! either accepts a request and returns a [`DispatchReceipt`] or fails, and
//! callers record reminder state only after a successful dispatch.
//!
//! # Channels
//!
//! - **SMS** and **WhatsApp** go to a mobile number
//! - **Email** goes to a mailbox address
//!
//! Contacts are checked for the right shape before anything is sent and are
//! redacted wherever a request is logged.
//!
//! # Example
//!
//! ```rust
//! use notification_service::{Channel, NotificationDispatcher, NotificationRequest, SimulatedDispatcher};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), notification_service::NotificationError> {
//! let dispatcher = SimulatedDispatcher::new();
//! let receipt = dispatcher
//!     .dispatch(NotificationRequest::new(
//!         Channel::Sms,
//!         "+91 98765 43210",
//!         "Reminder: dental check-up tomorrow at 10:00",
//!     ))
//!     .await?;
//!
//! assert_eq!(receipt.channel, Channel::Sms);
//! assert_eq!(dispatcher.sent().await.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod contact;
pub mod dispatcher;
pub mod error;
pub mod models;

pub use dispatcher::*;
pub use error::*;
pub use models::*;
