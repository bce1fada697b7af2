// Contact shape checks done before a request leaves the clinic
use crate::error::{NotificationError, NotificationResult};
use crate::models::Channel;

/// Check that `contact` can be addressed on `channel`.
///
/// Phone channels accept 10 to 12 digits once spaces, dashes and a leading
/// `+` are removed. Email needs a single `@` with a dotted domain.
pub fn validate_contact(channel: Channel, contact: &str) -> NotificationResult<()> {
    let contact = contact.trim();
    if contact.is_empty() {
        return Err(NotificationError::InvalidRequest(
            "recipient contact is empty".to_string(),
        ));
    }

    if channel.is_phone() {
        validate_phone(contact)
    } else {
        validate_email(contact)
    }
}

fn validate_phone(contact: &str) -> NotificationResult<()> {
    let digits: String = contact
        .trim_start_matches('+')
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) || !(10..=12).contains(&digits.len()) {
        return Err(NotificationError::InvalidRequest(format!(
            "not a phone number ({} characters)",
            contact.len()
        )));
    }
    Ok(())
}

fn validate_email(contact: &str) -> NotificationResult<()> {
    let mut parts = contact.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NotificationError::InvalidRequest(
            "email address needs exactly one '@'".to_string(),
        ));
    };

    let domain_ok = domain
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if local.is_empty() || !domain_ok {
        return Err(NotificationError::InvalidRequest(
            "malformed email address".to_string(),
        ));
    }
    Ok(())
}
