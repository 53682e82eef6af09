//! Lookup traits for the records the email generator reads.
//!
//! The application's data-access layer implements these traits; the
//! generator receives them as `Arc<dyn ...>` handles so any storage can be
//! plugged in. [`InMemoryDirectory`] implements all of them over a JSON
//! dataset.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::records::{Course, FeedbackSession, Instructor, Student};

mod memory;

pub use memory::{Completion, Dataset, InMemoryDirectory};

/// Errors raised by lookup collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Feedback session not found: {session} in course {course_id}")]
    SessionNotFound { course_id: String, session: String },

    #[error("Instructor not found: {email} in course {course_id}")]
    InstructorNotFound { course_id: String, email: String },

    #[error("Student not found: {email} in course {course_id}")]
    StudentNotFound { course_id: String, email: String },
}

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Course records
pub trait CourseDirectory: Send + Sync {
    fn course(&self, course_id: &str) -> LookupResult<Course>;
}

/// Students and instructors enrolled in courses
pub trait RosterDirectory: Send + Sync {
    /// All students of a course; empty for an unknown course
    fn students_for_course(&self, course_id: &str) -> Vec<Student>;

    /// All instructors of a course; empty for an unknown course
    fn instructors_for_course(&self, course_id: &str) -> Vec<Instructor>;

    fn student_for_email(&self, course_id: &str, email: &str) -> Option<Student>;
}

/// Feedback submission progress
pub trait SubmissionDirectory: Send + Sync {
    /// Whether the student has answered every question of the session.
    ///
    /// Fails when the session or its course does not exist.
    fn is_fully_completed_by(
        &self,
        session: &FeedbackSession,
        student_email: &str,
    ) -> LookupResult<bool>;
}

/// Comment visibility
pub trait CommentDirectory: Send + Sync {
    /// Addresses of users whose pending comments were just released
    fn pending_comment_recipients(&self, course_id: &str) -> LookupResult<BTreeSet<String>>;
}
