//! Domain records consumed by the email generator.
//!
//! These mirror the rows owned by the application's data-access layer. The
//! generator only reads them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A feedback session belonging to a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSession {
    /// Session name, unique within the course
    pub name: String,

    pub course_id: String,

    /// Submission deadline in the course's local time
    pub end_time: NaiveDateTime,

    /// Whether the session has questions for students to answer
    #[serde(default = "default_true")]
    pub open_to_students: bool,

    /// Whether published results are visible to students
    #[serde(default = "default_true")]
    pub results_visible_to_students: bool,
}

fn default_true() -> bool {
    true
}

impl FeedbackSession {
    pub fn new(
        course_id: impl Into<String>,
        name: impl Into<String>,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            course_id: course_id.into(),
            end_time,
            open_to_students: true,
            results_visible_to_students: true,
        }
    }
}

/// A student enrolled in a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub course_id: String,
    pub name: String,
    pub email: String,

    /// Registration key used in join and submission links
    #[serde(default)]
    pub registration_key: String,

    /// Linked user account, absent until the student joins the course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl Student {
    pub fn new(
        course_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            name: name.into(),
            email: email.into(),
            registration_key: String::new(),
            account_id: None,
        }
    }

    /// Whether the student has not yet linked an account to the course
    pub fn is_yet_to_join(&self) -> bool {
        self.account_id.as_deref().map_or(true, str::is_empty)
    }
}

/// An instructor of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub course_id: String,
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub registration_key: String,
}

impl Instructor {
    pub fn new(
        course_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            name: name.into(),
            email: email.into(),
            registration_key: String::new(),
        }
    }
}

/// HTTP request metadata attached to system error reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub method: String,
    pub user_agent: String,
    pub path: String,
    pub url: String,
    pub parameters: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_join_status() {
        let mut student = Student::new("CS101", "Alice", "a@x.com");
        assert!(student.is_yet_to_join());

        student.account_id = Some(String::new());
        assert!(student.is_yet_to_join());

        student.account_id = Some("alice.g".to_string());
        assert!(!student.is_yet_to_join());
    }

    #[test]
    fn test_session_visibility_defaults() {
        let session: FeedbackSession = serde_json::from_value(json!({
            "name": "Quiz1",
            "course_id": "CS101",
            "end_time": "2024-01-01T23:59:00"
        }))
        .unwrap();

        assert!(session.open_to_students);
        assert!(session.results_visible_to_students);
        assert_eq!(session.end_time.to_string(), "2024-01-01 23:59:00");
    }
}
