//! Email assembly for every notification kind.
//!
//! Each public method picks a template, a subject pattern and a recipient
//! set, builds placeholder bindings from the supplied records and renders the
//! result into [`EmailMessage`] values. Lookups go through the injected
//! [`Collaborators`]; nothing is sent or stored here.

use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::sync::Arc;

use super::kind::EmailKind;
use super::links::LinkBuilder;
use super::message::{EmailMessage, Sender};
use super::time::format_deadline;
use super::types::{Diagnostic, EmailResult, GeneratedEmails};
use crate::config::Settings;
use crate::data::{CommentDirectory, CourseDirectory, RosterDirectory, SubmissionDirectory};
use crate::records::{Course, FeedbackSession, Instructor, RequestInfo, Student};
use crate::template::catalog::{self, tokens};
use crate::template::{placeholders, render, Bindings};

const STUDENT_SUBMIT_URL_PLACEHOLDER: &str = "{The student's unique submission url appears here}";
const STUDENT_REPORT_URL_PLACEHOLDER: &str = "{The student's unique results url appears here}";
const NOT_LOGGED_IN: &str = "Not logged in";

/// Static identity stamped on generated emails
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub sender: Sender,
    /// Recipient of error reports and log digests, bcc'd on account welcomes
    pub support_email: String,
    pub app_name: String,
    pub app_version: String,
}

impl From<&Settings> for GeneratorConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            sender: Sender {
                email: settings.email.sender_email.clone(),
                name: settings.email.sender_name.clone(),
                reply_to: settings.email.reply_to.clone(),
            },
            support_email: settings.email.support_email.clone(),
            app_name: settings.app.name.clone(),
            app_version: settings.app.version.clone(),
        }
    }
}

/// Lookup and link-building dependencies of the generator
#[derive(Clone)]
pub struct Collaborators {
    pub courses: Arc<dyn CourseDirectory>,
    pub roster: Arc<dyn RosterDirectory>,
    pub submissions: Arc<dyn SubmissionDirectory>,
    pub comments: Arc<dyn CommentDirectory>,
    pub links: Arc<dyn LinkBuilder>,
}

impl Collaborators {
    /// Use one backend for every lookup
    pub fn from_directory<D>(directory: Arc<D>, links: Arc<dyn LinkBuilder>) -> Self
    where
        D: CourseDirectory + RosterDirectory + SubmissionDirectory + CommentDirectory + 'static,
    {
        Self {
            courses: directory.clone(),
            roster: directory.clone(),
            submissions: directory.clone(),
            comments: directory,
            links,
        }
    }
}

/// Generates notification emails from templates
pub struct EmailGenerator {
    config: GeneratorConfig,
    deps: Collaborators,
}

impl EmailGenerator {
    pub fn new(config: GeneratorConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            deps: collaborators,
        }
    }

    /// Opening emails: course students when the session has questions for
    /// them, plus a copy for every instructor.
    pub fn session_opening_emails(&self, session: &FeedbackSession) -> EmailResult<GeneratedEmails> {
        let course = self.deps.courses.course(&session.course_id)?;
        let students = if session.open_to_students {
            self.deps.roster.students_for_course(&session.course_id)
        } else {
            Vec::new()
        };
        let instructors = self.deps.roster.instructors_for_course(&session.course_id);

        let messages = self.session_email_batch(
            &course,
            session,
            &students,
            &instructors,
            EmailKind::SessionOpening,
            catalog::USER_FEEDBACK_SESSION,
        );
        Ok(GeneratedEmails::new(messages))
    }

    /// Reminder emails for the given students and instructors.
    ///
    /// `instructors_to_remind` get their own submission links,
    /// `instructors_to_notify` get the copy sent to students.
    pub fn session_reminder_emails(
        &self,
        session: &FeedbackSession,
        students: &[Student],
        instructors_to_remind: &[Instructor],
        instructors_to_notify: &[Instructor],
    ) -> EmailResult<GeneratedEmails> {
        let course = self.deps.courses.course(&session.course_id)?;
        let kind = EmailKind::SessionReminder;
        let template = catalog::USER_FEEDBACK_SESSION;

        let mut messages: Vec<EmailMessage> = instructors_to_remind
            .iter()
            .map(|instructor| self.instructor_reminder_email(&course, session, instructor, kind, template))
            .collect();
        messages.extend(self.session_email_batch(
            &course,
            session,
            students,
            instructors_to_notify,
            kind,
            template,
        ));

        Ok(GeneratedEmails::new(messages))
    }

    /// Closing emails for students who have not completed the session, plus
    /// a copy for every instructor.
    pub fn session_closing_emails(&self, session: &FeedbackSession) -> EmailResult<GeneratedEmails> {
        let mut diagnostics = Vec::new();
        let students = if session.open_to_students {
            self.students_yet_to_complete(session, &mut diagnostics)
        } else {
            Vec::new()
        };

        let course = self.deps.courses.course(&session.course_id)?;
        let instructors = self.deps.roster.instructors_for_course(&session.course_id);

        let messages = self.session_email_batch(
            &course,
            session,
            &students,
            &instructors,
            EmailKind::SessionClosing,
            catalog::USER_FEEDBACK_SESSION_CLOSING,
        );
        Ok(GeneratedEmails::with_diagnostics(messages, diagnostics))
    }

    /// Published emails: course students when results are visible to them,
    /// plus a copy for every instructor.
    pub fn session_published_emails(&self, session: &FeedbackSession) -> EmailResult<GeneratedEmails> {
        let course = self.deps.courses.course(&session.course_id)?;
        let students = if session.results_visible_to_students {
            self.deps.roster.students_for_course(&session.course_id)
        } else {
            Vec::new()
        };
        let instructors = self.deps.roster.instructors_for_course(&session.course_id);

        let messages = self.session_email_batch(
            &course,
            session,
            &students,
            &instructors,
            EmailKind::SessionPublished,
            catalog::USER_FEEDBACK_SESSION_PUBLISHED,
        );
        Ok(GeneratedEmails::new(messages))
    }

    /// Emails to students whose pending comments have just been released.
    ///
    /// A failed recipient lookup yields no messages and a diagnostic.
    pub fn pending_comments_cleared_emails(&self, course_id: &str) -> EmailResult<GeneratedEmails> {
        let mut diagnostics = Vec::new();
        let recipients = match self.deps.comments.pending_comment_recipients(course_id) {
            Ok(recipients) => recipients,
            Err(e) => {
                diagnostics.push(Diagnostic::RecipientLookupFailed {
                    course_id: course_id.to_string(),
                    reason: e.to_string(),
                });
                BTreeSet::new()
            }
        };

        if recipients.is_empty() {
            return Ok(GeneratedEmails::with_diagnostics(Vec::new(), diagnostics));
        }

        let course = self.deps.courses.course(course_id)?;
        let comments_url = self.deps.links.student_comments_url(&course);
        let kind = EmailKind::PendingCommentsCleared;

        let mut messages = Vec::with_capacity(recipients.len());
        for email in &recipients {
            let Some(student) = self.deps.roster.student_for_email(course_id, email) else {
                diagnostics.push(Diagnostic::UnknownCommentRecipient {
                    course_id: course_id.to_string(),
                    email: email.clone(),
                });
                continue;
            };

            let template = splice_join_fragment(
                catalog::USER_PENDING_COMMENTS_CLEARED,
                student_join_fragment(&student),
            );
            let bindings = Bindings::new()
                .bind(tokens::USER_NAME, &student.name)
                .bind(tokens::COURSE_NAME, &course.name)
                .bind(tokens::COURSE_ID, &course.id)
                .bind(tokens::COMMENTS_PAGE_URL, &comments_url)
                .bind(tokens::JOIN_URL, self.deps.links.student_join_url(&student));

            messages.push(self.compose(&student.email, kind, &template, bindings));
        }

        tracing::debug!(course_id = %course_id, count = messages.len(), "Generated pending comment emails");
        Ok(GeneratedEmails::with_diagnostics(messages, diagnostics))
    }

    /// Welcome email for a newly approved instructor account; support is bcc'd.
    pub fn new_instructor_account_email(
        &self,
        instructor: &Instructor,
        short_name: &str,
        institute: &str,
    ) -> EmailMessage {
        let bindings = Bindings::new()
            .bind(tokens::USER_NAME, short_name)
            .bind(
                tokens::JOIN_URL,
                self.new_instructor_account_join_link(instructor, institute),
            );

        self.compose(
            &instructor.email,
            EmailKind::NewInstructorAccount,
            catalog::NEW_INSTRUCTOR_ACCOUNT_WELCOME,
            bindings,
        )
        .with_bcc(&self.config.support_email)
    }

    /// Join link sent to an account requester
    pub fn new_instructor_account_join_link(&self, instructor: &Instructor, institute: &str) -> String {
        self.deps.links.instructor_join_url(instructor, Some(institute))
    }

    /// Invitation for a student to join a course
    pub fn student_course_join_email(&self, course: &Course, student: &Student) -> EmailMessage {
        self.course_join_email(
            course,
            &student.name,
            &student.email,
            EmailKind::StudentCourseJoin,
            catalog::FRAGMENT_STUDENT_COURSE_JOIN,
            self.deps.links.student_join_url(student),
        )
    }

    /// Invitation for a student to relink after their account was reset
    pub fn student_course_rejoin_email(&self, course: &Course, student: &Student) -> EmailMessage {
        self.course_join_email(
            course,
            &student.name,
            &student.email,
            EmailKind::StudentCourseRejoinAfterReset,
            catalog::FRAGMENT_STUDENT_COURSE_REJOIN_AFTER_RESET,
            self.deps.links.student_join_url(student),
        )
    }

    /// Invitation for an instructor to join a course
    pub fn instructor_course_join_email(&self, course: &Course, instructor: &Instructor) -> EmailMessage {
        self.course_join_email(
            course,
            &instructor.name,
            &instructor.email,
            EmailKind::InstructorCourseJoin,
            catalog::FRAGMENT_INSTRUCTOR_COURSE_JOIN,
            self.deps.links.instructor_join_url(instructor, None),
        )
    }

    /// Error report for the support address.
    ///
    /// When the error renders as an empty message, the first line of the
    /// report is used in its place.
    pub fn system_error_email(
        &self,
        request: &RequestInfo,
        actual_user: Option<&str>,
        error: &(dyn StdError + 'static),
    ) -> EmailMessage {
        let stack_trace = error_report(error);
        let mut error_message = error.to_string();
        if error_message.trim().is_empty() {
            error_message = stack_trace
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap_or_default()
                .to_string();
        }

        let actual_user = actual_user
            .filter(|id| !id.is_empty())
            .unwrap_or(NOT_LOGGED_IN);

        let bindings = Bindings::new()
            .bind(tokens::ACTUAL_USER, actual_user)
            .bind(tokens::REQUEST_METHOD, &request.method)
            .bind(tokens::REQUEST_USER_AGENT, &request.user_agent)
            .bind(tokens::REQUEST_URL, &request.url)
            .bind(tokens::REQUEST_PATH, &request.path)
            .bind(tokens::REQUEST_PARAMETERS, &request.parameters)
            .bind(tokens::ERROR_MESSAGE, error_message)
            .bind(tokens::STACK_TRACE, stack_trace);

        self.compose(
            &self.config.support_email,
            EmailKind::SystemError,
            catalog::SYSTEM_ERROR,
            bindings,
        )
    }

    /// Digest of severe log lines for the support address
    pub fn compiled_logs_email(&self, logs: &str) -> EmailMessage {
        let subject = render(
            EmailKind::SevereLogsCompilation.subject_pattern(),
            &self.app_bindings(Bindings::new()),
        );

        EmailMessage::new(
            &self.config.sender,
            &self.config.support_email,
            subject,
            logs.replace('\n', "<br>"),
        )
    }

    /// Free-form email with caller-supplied subject and content
    pub fn admin_email(&self, content: &str, subject: &str, recipient: &str) -> EmailMessage {
        EmailMessage::new(&self.config.sender, recipient, subject, content)
    }

    fn students_yet_to_complete(
        &self,
        session: &FeedbackSession,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Student> {
        let mut pending = Vec::new();

        for student in self.deps.roster.students_for_course(&session.course_id) {
            match self.deps.submissions.is_fully_completed_by(session, &student.email) {
                Ok(true) => {}
                Ok(false) => pending.push(student),
                Err(e) => {
                    // The same lookup fails for every remaining student
                    diagnostics.push(Diagnostic::EligibilityScanAborted {
                        course_id: session.course_id.clone(),
                        session: session.name.clone(),
                        reason: e.to_string(),
                    });
                    return Vec::new();
                }
            }
        }

        pending
    }

    fn session_email_batch(
        &self,
        course: &Course,
        session: &FeedbackSession,
        students: &[Student],
        instructors: &[Instructor],
        kind: EmailKind,
        template: &str,
    ) -> Vec<EmailMessage> {
        let mut messages = Vec::with_capacity(students.len() + instructors.len());

        for student in students {
            messages.push(self.student_session_email(course, session, student, kind, template));
        }
        for instructor in instructors {
            messages.push(self.instructor_session_copy(course, session, instructor, kind, template));
        }

        tracing::debug!(
            kind = ?kind,
            course_id = %course.id,
            session = %session.name,
            students = students.len(),
            instructors = instructors.len(),
            "Generated session emails"
        );
        messages
    }

    fn student_session_email(
        &self,
        course: &Course,
        session: &FeedbackSession,
        student: &Student,
        kind: EmailKind,
        template: &str,
    ) -> EmailMessage {
        let links = &self.deps.links;
        let template = splice_join_fragment(template, student_join_fragment(student));
        let bindings = session_bindings(course, session, &student.name, kind)
            .bind(tokens::INSTRUCTOR_FRAGMENT, "")
            .bind(
                tokens::SUBMIT_URL,
                links.student_submission_url(course, session, student),
            )
            .bind(
                tokens::REPORT_URL,
                links.student_results_url(course, session, student),
            )
            .bind(tokens::JOIN_URL, links.student_join_url(student));

        self.compose(&student.email, kind, &template, bindings)
    }

    fn instructor_session_copy(
        &self,
        course: &Course,
        session: &FeedbackSession,
        instructor: &Instructor,
        kind: EmailKind,
        template: &str,
    ) -> EmailMessage {
        let fragment = format!(
            "The email below has been sent to students of course: {}.<p/><br/>",
            course.id
        );
        let bindings = session_bindings(course, session, &instructor.name, kind)
            .bind(tokens::INSTRUCTOR_FRAGMENT, fragment)
            .bind(tokens::SUBMIT_URL, STUDENT_SUBMIT_URL_PLACEHOLDER)
            .bind(tokens::REPORT_URL, STUDENT_REPORT_URL_PLACEHOLDER)
            .bind(tokens::JOIN_FRAGMENT, "");

        self.compose(&instructor.email, kind, template, bindings)
    }

    fn instructor_reminder_email(
        &self,
        course: &Course,
        session: &FeedbackSession,
        instructor: &Instructor,
        kind: EmailKind,
        template: &str,
    ) -> EmailMessage {
        let links = &self.deps.links;
        let bindings = session_bindings(course, session, &instructor.name, kind)
            .bind(tokens::INSTRUCTOR_FRAGMENT, "")
            .bind(
                tokens::SUBMIT_URL,
                links.instructor_submission_url(course, session),
            )
            .bind(tokens::REPORT_URL, links.instructor_results_url(course, session))
            .bind(tokens::JOIN_FRAGMENT, "");

        self.compose(&instructor.email, kind, template, bindings)
    }

    fn course_join_email(
        &self,
        course: &Course,
        user_name: &str,
        recipient: &str,
        kind: EmailKind,
        fragment: &str,
        join_url: String,
    ) -> EmailMessage {
        let template = splice_join_fragment(catalog::USER_COURSE_JOIN, fragment);
        let bindings = Bindings::new()
            .bind(tokens::USER_NAME, user_name)
            .bind(tokens::COURSE_NAME, &course.name)
            .bind(tokens::COURSE_ID, &course.id)
            .bind(tokens::JOIN_URL, join_url);

        self.compose(recipient, kind, &template, bindings)
    }

    /// Append the application-wide bindings
    fn app_bindings(&self, bindings: Bindings) -> Bindings {
        bindings
            .bind(tokens::APP_NAME, &self.config.app_name)
            .bind(tokens::APP_VERSION, &self.config.app_version)
            .bind(tokens::SUPPORT_EMAIL, &self.config.support_email)
    }

    /// Render body and subject with the same bindings and address the result
    fn compose(
        &self,
        recipient: &str,
        kind: EmailKind,
        template: &str,
        bindings: Bindings,
    ) -> EmailMessage {
        let bindings = self.app_bindings(bindings);
        let content = render(template, &bindings);
        let subject = render(kind.subject_pattern(), &bindings);

        let unbound = placeholders(&content);
        if !unbound.is_empty() {
            tracing::debug!(kind = ?kind, tokens = ?unbound, "Unbound placeholders left in email body");
        }

        EmailMessage::new(&self.config.sender, recipient, subject, content)
    }
}

fn session_bindings(
    course: &Course,
    session: &FeedbackSession,
    user_name: &str,
    kind: EmailKind,
) -> Bindings {
    let mut bindings = Bindings::new()
        .bind(tokens::USER_NAME, user_name)
        .bind(tokens::COURSE_NAME, &course.name)
        .bind(tokens::COURSE_ID, &course.id)
        .bind(tokens::SESSION_NAME, &session.name)
        .bind(tokens::DEADLINE, format_deadline(session.end_time));
    if let Some(status) = kind.session_status() {
        bindings.push(tokens::STATUS, status);
    }
    bindings
}

fn student_join_fragment(student: &Student) -> &'static str {
    if student.is_yet_to_join() {
        catalog::FRAGMENT_STUDENT_COURSE_JOIN
    } else {
        ""
    }
}

/// Insert a fragment so its own tokens are bound by the following pass
fn splice_join_fragment(template: &str, fragment: &str) -> String {
    render(template, &Bindings::new().bind(tokens::JOIN_FRAGMENT, fragment))
}

/// Error text with its chain of causes
fn error_report(error: &(dyn StdError + 'static)) -> String {
    let mut report = format!("{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(report, "\nCaused by: {cause}");
        source = cause.source();
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Silent;

    impl fmt::Display for Silent {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Ok(())
        }
    }

    impl StdError for Silent {}

    #[derive(Debug)]
    struct Wrapped(Silent);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "request failed")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_report_lists_causes() {
        let report = error_report(&Wrapped(Silent));
        assert_eq!(report, "Wrapped(Silent)\nCaused by: ");
    }

    #[test]
    fn test_splice_join_fragment_keeps_fragment_tokens() {
        let spliced = splice_join_fragment("A ${joinFragment} B", "go to ${joinUrl}");
        assert_eq!(spliced, "A go to ${joinUrl} B");
    }

    #[test]
    fn test_session_bindings_status_only_for_status_kinds() {
        let end = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let course = Course::new("CS101", "Intro");
        let session = FeedbackSession::new("CS101", "Quiz1", end);

        let opening = session_bindings(&course, &session, "Alice", EmailKind::SessionOpening);
        assert!(opening.iter().any(|(t, v)| t == tokens::STATUS && v == "is now open"));

        let published = session_bindings(&course, &session, "Alice", EmailKind::SessionPublished);
        assert!(!published.iter().any(|(t, _)| t == tokens::STATUS));
    }
}
