use async_trait::async_trait;
use chrono::Utc;
use logger_redacted::PiiRedactor;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::contact::validate_contact;
use crate::error::{NotificationError, NotificationResult};
use crate::models::{DispatchReceipt, NotificationRequest};

/// Hands a message to an SMS, WhatsApp or email gateway.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Gateway name, used in logs
    fn name(&self) -> &str;

    /// Accept one request. No retries are attempted.
    async fn dispatch(&self, request: NotificationRequest) -> NotificationResult<DispatchReceipt>;
}

/// In-memory dispatcher for the desk demo and tests.
///
/// Requests are validated and logged with the contact redacted, then kept
/// in an outbox that [`SimulatedDispatcher::sent`] returns.
#[derive(Debug)]
pub struct SimulatedDispatcher {
    redactor: PiiRedactor,
    outbox: Mutex<Vec<(DispatchReceipt, NotificationRequest)>>,
    offline: bool,
}

impl Default for SimulatedDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedDispatcher {
    pub fn new() -> Self {
        Self {
            redactor: PiiRedactor::default(),
            outbox: Mutex::new(Vec::new()),
            offline: false,
        }
    }

    /// A gateway that rejects every valid request with `DispatchFailed`.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub async fn sent(&self) -> Vec<NotificationRequest> {
        self.outbox
            .lock()
            .await
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub async fn receipts(&self) -> Vec<DispatchReceipt> {
        self.outbox
            .lock()
            .await
            .iter()
            .map(|(receipt, _)| receipt.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationDispatcher for SimulatedDispatcher {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn dispatch(&self, request: NotificationRequest) -> NotificationResult<DispatchReceipt> {
        let contact = self.redactor.redact(&request.recipient_contact);

        if let Err(e) = validate_contact(request.channel, &request.recipient_contact) {
            warn!(channel = %request.channel, contact = %contact, error = %e, "notification rejected");
            return Err(e);
        }
        if request.message.trim().is_empty() {
            warn!(channel = %request.channel, contact = %contact, "notification rejected: empty message");
            return Err(NotificationError::InvalidRequest(
                "message is empty".to_string(),
            ));
        }
        if self.offline {
            warn!(channel = %request.channel, contact = %contact, "gateway offline");
            return Err(NotificationError::DispatchFailed(format!(
                "{} gateway is offline",
                request.channel
            )));
        }

        let receipt = DispatchReceipt {
            id: Uuid::new_v4(),
            channel: request.channel,
            accepted_at: Utc::now(),
        };
        info!(
            dispatcher = self.name(),
            receipt_id = %receipt.id,
            channel = %request.channel,
            contact = %contact,
            length = request.message.len(),
            "notification dispatched"
        );

        self.outbox.lock().await.push((receipt.clone(), request));
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;

    #[tokio::test]
    async fn test_dispatch_records_request() {
        let dispatcher = SimulatedDispatcher::new();
        let request = NotificationRequest::new(
            Channel::WhatsApp,
            "9876543210",
            "Your invoice DN-2026-001 has been paid.",
        );

        let receipt = dispatcher.dispatch(request.clone()).await.unwrap();

        assert_eq!(receipt.channel, Channel::WhatsApp);
        assert_eq!(dispatcher.sent().await, vec![request]);
        assert_eq!(dispatcher.receipts().await, vec![receipt]);
    }

    #[tokio::test]
    async fn test_invalid_requests_are_not_recorded() {
        let dispatcher = SimulatedDispatcher::new();

        let empty_contact = dispatcher
            .dispatch(NotificationRequest::new(Channel::Sms, "", "Hello"))
            .await;
        let empty_message = dispatcher
            .dispatch(NotificationRequest::new(Channel::Email, "amit@email.com", "  "))
            .await;

        assert!(matches!(empty_contact, Err(NotificationError::InvalidRequest(_))));
        assert!(matches!(empty_message, Err(NotificationError::InvalidRequest(_))));
        assert!(dispatcher.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_gateway_fails() {
        let dispatcher = SimulatedDispatcher::offline();
        let result = dispatcher
            .dispatch(NotificationRequest::new(Channel::Sms, "9876543210", "Hello"))
            .await;

        assert!(matches!(result, Err(NotificationError::DispatchFailed(_))));
        assert!(dispatcher.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let dispatcher: Box<dyn NotificationDispatcher> = Box::new(SimulatedDispatcher::new());
        assert_eq!(dispatcher.name(), "simulated");
        assert!(dispatcher
            .dispatch(NotificationRequest::new(Channel::Email, "neha@email.com", "Receipt"))
            .await
            .is_ok());
    }
}
