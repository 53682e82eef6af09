//! Assembled email messages

use serde::{Deserialize, Serialize};

/// Fixed sender metadata stamped on every generated message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub email: String,
    pub name: String,
    pub reply_to: String,
}

/// A generated email ready to hand to a delivery transport.
///
/// Fields are read-only once the message leaves the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    recipient: String,
    sender_email: String,
    sender_name: String,
    reply_to: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    bcc: Vec<String>,
    subject: String,
    content: String,
}

impl EmailMessage {
    pub(crate) fn new(
        sender: &Sender,
        recipient: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            sender_email: sender.email.clone(),
            sender_name: sender.name.clone(),
            reply_to: sender.reply_to.clone(),
            bcc: Vec::new(),
            subject: subject.into(),
            content: content.into(),
        }
    }

    pub(crate) fn with_bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn sender_email(&self) -> &str {
        &self.sender_email
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn reply_to(&self) -> &str {
        &self.reply_to
    }

    pub fn bcc(&self) -> &[String] {
        &self.bcc
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// HTML-capable body
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Sender {
        Sender {
            email: "admin@x.com".to_string(),
            name: "Admin".to_string(),
            reply_to: "help@x.com".to_string(),
        }
    }

    #[test]
    fn test_new_message_copies_sender() {
        let msg = EmailMessage::new(&sender(), "a@x.com", "Hi", "<p>Body</p>");

        assert_eq!(msg.recipient(), "a@x.com");
        assert_eq!(msg.sender_email(), "admin@x.com");
        assert_eq!(msg.sender_name(), "Admin");
        assert_eq!(msg.reply_to(), "help@x.com");
        assert_eq!(msg.subject(), "Hi");
        assert_eq!(msg.content(), "<p>Body</p>");
        assert!(msg.bcc().is_empty());
    }

    #[test]
    fn test_bcc_serialization() {
        let plain = EmailMessage::new(&sender(), "a@x.com", "Hi", "Body");
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("bcc").is_none());

        let copied = plain.with_bcc("support@x.com");
        let value = serde_json::to_value(&copied).unwrap();
        assert_eq!(value["bcc"][0], "support@x.com");
    }
}
