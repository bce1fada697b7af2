use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Sms,
    WhatsApp,
    Email,
}

impl Channel {
    /// Whether the contact for this channel is a phone number.
    pub fn is_phone(self) -> bool {
        matches!(self, Channel::Sms | Channel::WhatsApp)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Channel::Sms => "SMS",
            Channel::WhatsApp => "WhatsApp",
            Channel::Email => "Email",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub channel: Channel,
    pub recipient_contact: String,
    pub message: String,
}

impl NotificationRequest {
    pub fn new(
        channel: Channel,
        recipient_contact: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            recipient_contact: recipient_contact.into(),
            message: message.into(),
        }
    }
}

/// Proof that a dispatcher accepted a request. Says nothing about delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    pub id: Uuid,
    pub channel: Channel,
    pub accepted_at: DateTime<Utc>,
}
