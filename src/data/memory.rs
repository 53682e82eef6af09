//! In-memory lookup backend loaded from a JSON dataset.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CommentDirectory, CourseDirectory, LookupError, LookupResult, RosterDirectory,
    SubmissionDirectory,
};
use crate::error::Result;
use crate::records::{Course, FeedbackSession, Instructor, Student};

/// A student's completed submission for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub course_id: String,
    pub session: String,
    pub student_email: String,
}

/// Snapshot of the records the generator may look up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub sessions: Vec<FeedbackSession>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub completions: Vec<Completion>,
    /// Course id to addresses with newly released comments
    #[serde(default)]
    pub pending_comment_recipients: HashMap<String, BTreeSet<String>>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// Lookup backend answering every directory trait from a [`Dataset`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    data: Dataset,
}

impl InMemoryDirectory {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    fn has_course(&self, course_id: &str) -> bool {
        self.data.courses.iter().any(|c| c.id == course_id)
    }

    /// Look up a session by course and name
    pub fn session(&self, course_id: &str, name: &str) -> LookupResult<FeedbackSession> {
        if !self.has_course(course_id) {
            return Err(LookupError::CourseNotFound(course_id.to_string()));
        }

        self.data
            .sessions
            .iter()
            .find(|s| s.course_id == course_id && s.name == name)
            .cloned()
            .ok_or_else(|| LookupError::SessionNotFound {
                course_id: course_id.to_string(),
                session: name.to_string(),
            })
    }

    pub fn student(&self, course_id: &str, email: &str) -> LookupResult<Student> {
        self.student_for_email(course_id, email)
            .ok_or_else(|| LookupError::StudentNotFound {
                course_id: course_id.to_string(),
                email: email.to_string(),
            })
    }

    pub fn instructor(&self, course_id: &str, email: &str) -> LookupResult<Instructor> {
        self.data
            .instructors
            .iter()
            .find(|i| i.course_id == course_id && i.email == email)
            .cloned()
            .ok_or_else(|| LookupError::InstructorNotFound {
                course_id: course_id.to_string(),
                email: email.to_string(),
            })
    }
}

impl CourseDirectory for InMemoryDirectory {
    fn course(&self, course_id: &str) -> LookupResult<Course> {
        self.data
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .ok_or_else(|| LookupError::CourseNotFound(course_id.to_string()))
    }
}

impl RosterDirectory for InMemoryDirectory {
    fn students_for_course(&self, course_id: &str) -> Vec<Student> {
        self.data
            .students
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect()
    }

    fn instructors_for_course(&self, course_id: &str) -> Vec<Instructor> {
        self.data
            .instructors
            .iter()
            .filter(|i| i.course_id == course_id)
            .cloned()
            .collect()
    }

    fn student_for_email(&self, course_id: &str, email: &str) -> Option<Student> {
        self.data
            .students
            .iter()
            .find(|s| s.course_id == course_id && s.email == email)
            .cloned()
    }
}

impl SubmissionDirectory for InMemoryDirectory {
    fn is_fully_completed_by(
        &self,
        session: &FeedbackSession,
        student_email: &str,
    ) -> LookupResult<bool> {
        // Validates that both the course and the session exist
        self.session(&session.course_id, &session.name)?;

        Ok(self.data.completions.iter().any(|c| {
            c.course_id == session.course_id
                && c.session == session.name
                && c.student_email == student_email
        }))
    }
}

impl CommentDirectory for InMemoryDirectory {
    fn pending_comment_recipients(&self, course_id: &str) -> LookupResult<BTreeSet<String>> {
        if !self.has_course(course_id) {
            return Err(LookupError::CourseNotFound(course_id.to_string()));
        }

        Ok(self
            .data
            .pending_comment_recipients
            .get(course_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_directory() -> InMemoryDirectory {
        let data: Dataset = serde_json::from_value(json!({
            "courses": [{"id": "CS101", "name": "Intro"}],
            "sessions": [{
                "name": "Quiz1",
                "course_id": "CS101",
                "end_time": "2024-01-01T23:59:00"
            }],
            "students": [
                {"course_id": "CS101", "name": "Alice", "email": "a@x.com"},
                {"course_id": "CS101", "name": "Bob", "email": "b@x.com", "account_id": "bob"}
            ],
            "instructors": [{"course_id": "CS101", "name": "Ivy", "email": "ivy@x.com"}],
            "completions": [{"course_id": "CS101", "session": "Quiz1", "student_email": "b@x.com"}],
            "pending_comment_recipients": {"CS101": ["a@x.com"]}
        }))
        .unwrap();

        InMemoryDirectory::new(data)
    }

    #[test]
    fn test_course_lookup() {
        let dir = sample_directory();

        assert_eq!(dir.course("CS101").unwrap().name, "Intro");
        assert_eq!(
            dir.course("CS999"),
            Err(LookupError::CourseNotFound("CS999".to_string()))
        );
    }

    #[test]
    fn test_roster_lookup() {
        let dir = sample_directory();

        assert_eq!(dir.students_for_course("CS101").len(), 2);
        assert_eq!(dir.instructors_for_course("CS101").len(), 1);
        assert!(dir.students_for_course("CS999").is_empty());
        assert_eq!(dir.student_for_email("CS101", "b@x.com").unwrap().name, "Bob");
        assert!(dir.student_for_email("CS101", "nobody@x.com").is_none());
        assert!(dir.instructor("CS101", "ivy@x.com").is_ok());
        assert!(matches!(
            dir.student("CS101", "nobody@x.com"),
            Err(LookupError::StudentNotFound { .. })
        ));
    }

    #[test]
    fn test_completion_lookup() {
        let dir = sample_directory();
        let session = dir.session("CS101", "Quiz1").unwrap();

        assert!(!dir.is_fully_completed_by(&session, "a@x.com").unwrap());
        assert!(dir.is_fully_completed_by(&session, "b@x.com").unwrap());
    }

    #[test]
    fn test_completion_lookup_unknown_session() {
        let dir = sample_directory();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let session = FeedbackSession::new("CS101", "Missing", end);

        assert!(matches!(
            dir.is_fully_completed_by(&session, "a@x.com"),
            Err(LookupError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_pending_comment_recipients() {
        let dir = sample_directory();

        let recipients = dir.pending_comment_recipients("CS101").unwrap();
        assert!(recipients.contains("a@x.com"));
        assert!(dir.pending_comment_recipients("CS999").is_err());
    }

    #[test]
    fn test_dataset_from_json_str() {
        let data = Dataset::from_json_str(r#"{"courses": [{"id": "C1", "name": "One"}]}"#).unwrap();
        assert_eq!(data.courses.len(), 1);
        assert!(data.students.is_empty());

        assert!(Dataset::from_json_str("not json").is_err());
    }
}
