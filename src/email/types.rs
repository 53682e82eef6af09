//! Email generation result and error types

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::message::EmailMessage;
use crate::data::LookupError;

/// Email generation error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Result type for email generation
pub type EmailResult<T> = Result<T, EmailError>;

/// Non-fatal condition encountered while generating a batch of emails
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Completion lookup failed during the closing-email scan; no student
    /// will receive a closing email for this session
    EligibilityScanAborted {
        course_id: String,
        session: String,
        reason: String,
    },

    /// Pending comment recipients could not be fetched
    RecipientLookupFailed { course_id: String, reason: String },

    /// A pending comment recipient is not a student of the course
    UnknownCommentRecipient { course_id: String, email: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EligibilityScanAborted {
                course_id,
                session,
                reason,
            } => write!(
                f,
                "Course {} or session {} does not exist, closing emails skipped for students: {}",
                course_id, session, reason
            ),
            Diagnostic::RecipientLookupFailed { course_id, reason } => write!(
                f,
                "Recipient emails for pending comments in course {} could not be fetched: {}",
                course_id, reason
            ),
            Diagnostic::UnknownCommentRecipient { course_id, email } => write!(
                f,
                "Pending comment recipient {} is not a student of course {}",
                email, course_id
            ),
        }
    }
}

/// Messages produced by one generation call plus any diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedEmails {
    pub messages: Vec<EmailMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedEmails {
    pub fn new(messages: Vec<EmailMessage>) -> Self {
        Self {
            messages,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(messages: Vec<EmailMessage>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            messages,
            diagnostics,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages addressed to the given recipient
    pub fn to_recipient<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a EmailMessage> {
        self.messages.iter().filter(move |m| m.recipient() == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::RecipientLookupFailed {
            course_id: "CS101".to_string(),
            reason: "Course not found: CS101".to_string(),
        };
        assert_eq!(
            diag.to_string(),
            "Recipient emails for pending comments in course CS101 could not be fetched: Course not found: CS101"
        );
    }

    #[test]
    fn test_diagnostic_serializes_with_kind_tag() {
        let diag = Diagnostic::UnknownCommentRecipient {
            course_id: "CS101".to_string(),
            email: "x@y.com".to_string(),
        };
        let value = serde_json::to_value(&diag).unwrap();
        assert_eq!(value["kind"], "unknown_comment_recipient");
        assert_eq!(value["email"], "x@y.com");
    }
}
