use serde::{Deserialize, Serialize};

/// Business events that produce an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    SessionOpening,
    SessionReminder,
    SessionClosing,
    SessionPublished,
    PendingCommentsCleared,
    NewInstructorAccount,
    StudentCourseJoin,
    StudentCourseRejoinAfterReset,
    InstructorCourseJoin,
    SystemError,
    SevereLogsCompilation,
}

impl EmailKind {
    /// Subject line with `${token}` placeholders, rendered like a body
    pub fn subject_pattern(self) -> &'static str {
        match self {
            EmailKind::SessionOpening => {
                "${appName}: Feedback session now open [Course: ${courseName}][Feedback Session: ${feedbackSessionName}]"
            }
            EmailKind::SessionReminder => {
                "${appName}: Feedback session reminder [Course: ${courseName}][Feedback Session: ${feedbackSessionName}]"
            }
            EmailKind::SessionClosing => {
                "${appName}: Feedback session closing soon [Course: ${courseName}][Feedback Session: ${feedbackSessionName}]"
            }
            EmailKind::SessionPublished => {
                "${appName}: Feedback session results published [Course: ${courseName}][Feedback Session: ${feedbackSessionName}]"
            }
            EmailKind::PendingCommentsCleared => {
                "${appName}: You have new comments [Course: ${courseName}][Course ID: ${courseId}]"
            }
            EmailKind::NewInstructorAccount => "${appName}: Welcome to ${appName}! ${userName}",
            EmailKind::StudentCourseJoin => {
                "${appName}: Invitation to join course [${courseName}][Course ID: ${courseId}]"
            }
            EmailKind::StudentCourseRejoinAfterReset => {
                "${appName}: Your account has been reset for course [${courseName}][Course ID: ${courseId}]"
            }
            EmailKind::InstructorCourseJoin => {
                "${appName}: Invitation to join course as an instructor [${courseName}][Course ID: ${courseId}]"
            }
            EmailKind::SystemError => "${appName} (${appVersion}): New System Exception: ${errorMessage}",
            EmailKind::SevereLogsCompilation => {
                "${appName} (${appVersion}): Severe Error Logs Compilation"
            }
        }
    }

    /// Status phrase substituted into shared session templates
    pub fn session_status(self) -> Option<&'static str> {
        match self {
            EmailKind::SessionOpening => Some("is now open"),
            EmailKind::SessionReminder => Some("is still open for submissions"),
            EmailKind::SessionClosing => Some("is closing soon"),
            _ => None,
        }
    }
}
