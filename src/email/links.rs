//! Absolute links embedded in generated emails

use url::Url;

use crate::records::{Course, FeedbackSession, Instructor, Student};

pub const STUDENT_SUBMISSION_PAGE: &str = "/page/studentFeedbackSubmissionEditPage";
pub const STUDENT_RESULTS_PAGE: &str = "/page/studentFeedbackResultsPage";
pub const INSTRUCTOR_SUBMISSION_PAGE: &str = "/page/instructorFeedbackSubmissionEditPage";
pub const INSTRUCTOR_RESULTS_PAGE: &str = "/page/instructorFeedbackResultsPage";
pub const STUDENT_COMMENTS_PAGE: &str = "/page/studentCommentsPage";
pub const STUDENT_COURSE_JOIN_PAGE: &str = "/page/studentCourseJoinAuthentication";
pub const INSTRUCTOR_COURSE_JOIN_PAGE: &str = "/page/instructorCourseJoin";

/// Builds the absolute URLs placed in email bodies.
///
/// Implementations own any encoding of registration keys.
pub trait LinkBuilder: Send + Sync {
    fn student_submission_url(
        &self,
        course: &Course,
        session: &FeedbackSession,
        student: &Student,
    ) -> String;

    fn student_results_url(
        &self,
        course: &Course,
        session: &FeedbackSession,
        student: &Student,
    ) -> String;

    fn instructor_submission_url(&self, course: &Course, session: &FeedbackSession) -> String;

    fn instructor_results_url(&self, course: &Course, session: &FeedbackSession) -> String;

    fn student_comments_url(&self, course: &Course) -> String;

    fn student_join_url(&self, student: &Student) -> String;

    fn instructor_join_url(&self, instructor: &Instructor, institute: Option<&str>) -> String;
}

/// Default link builder rooted at the application's base URL.
///
/// Registration keys are written as given.
#[derive(Debug, Clone)]
pub struct AppLinks {
    base: Url,
}

impl AppLinks {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    fn page(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = self.base.clone();
        // Page paths are appended to any path prefix of the base
        let prefixed = format!("{}{}", self.base.path().trim_end_matches('/'), path);
        url.set_path(&prefixed);
        url.set_query(None);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url.to_string()
    }
}

impl LinkBuilder for AppLinks {
    fn student_submission_url(
        &self,
        course: &Course,
        session: &FeedbackSession,
        student: &Student,
    ) -> String {
        self.page(
            STUDENT_SUBMISSION_PAGE,
            &[
                ("courseid", course.id.as_str()),
                ("fsname", session.name.as_str()),
                ("regkey", student.registration_key.as_str()),
                ("studentemail", student.email.as_str()),
            ],
        )
    }

    fn student_results_url(
        &self,
        course: &Course,
        session: &FeedbackSession,
        student: &Student,
    ) -> String {
        self.page(
            STUDENT_RESULTS_PAGE,
            &[
                ("courseid", course.id.as_str()),
                ("fsname", session.name.as_str()),
                ("regkey", student.registration_key.as_str()),
                ("studentemail", student.email.as_str()),
            ],
        )
    }

    fn instructor_submission_url(&self, course: &Course, session: &FeedbackSession) -> String {
        self.page(
            INSTRUCTOR_SUBMISSION_PAGE,
            &[("courseid", course.id.as_str()), ("fsname", session.name.as_str())],
        )
    }

    fn instructor_results_url(&self, course: &Course, session: &FeedbackSession) -> String {
        self.page(
            INSTRUCTOR_RESULTS_PAGE,
            &[("courseid", course.id.as_str()), ("fsname", session.name.as_str())],
        )
    }

    fn student_comments_url(&self, course: &Course) -> String {
        self.page(STUDENT_COMMENTS_PAGE, &[("courseid", course.id.as_str())])
    }

    fn student_join_url(&self, student: &Student) -> String {
        self.page(
            STUDENT_COURSE_JOIN_PAGE,
            &[
                ("regkey", student.registration_key.as_str()),
                ("courseid", student.course_id.as_str()),
                ("studentemail", student.email.as_str()),
            ],
        )
    }

    fn instructor_join_url(&self, instructor: &Instructor, institute: Option<&str>) -> String {
        let mut params = vec![("regkey", instructor.registration_key.as_str())];
        if let Some(institute) = institute {
            params.push(("instructorinstitution", institute));
        }
        self.page(INSTRUCTOR_COURSE_JOIN_PAGE, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixtures() -> (Course, FeedbackSession, Student) {
        let end = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let mut student = Student::new("CS101", "Alice", "a@x.com");
        student.registration_key = "k3y".to_string();
        (
            Course::new("CS101", "Intro"),
            FeedbackSession::new("CS101", "Quiz 1", end),
            student,
        )
    }

    #[test]
    fn test_student_submission_url() {
        let links = AppLinks::new("https://portal.example").unwrap();
        let (course, session, student) = fixtures();

        assert_eq!(
            links.student_submission_url(&course, &session, &student),
            "https://portal.example/page/studentFeedbackSubmissionEditPage?courseid=CS101&fsname=Quiz+1&regkey=k3y&studentemail=a%40x.com"
        );
    }

    #[test]
    fn test_instructor_results_url() {
        let links = AppLinks::new("https://portal.example/").unwrap();
        let (course, session, _) = fixtures();

        assert_eq!(
            links.instructor_results_url(&course, &session),
            "https://portal.example/page/instructorFeedbackResultsPage?courseid=CS101&fsname=Quiz+1"
        );
    }

    #[test]
    fn test_instructor_join_url_with_institute() {
        let links = AppLinks::new("https://portal.example").unwrap();
        let mut instructor = Instructor::new("CS101", "Ivy", "ivy@x.com");
        instructor.registration_key = "ik".to_string();

        assert_eq!(
            links.instructor_join_url(&instructor, None),
            "https://portal.example/page/instructorCourseJoin?regkey=ik"
        );
        assert_eq!(
            links.instructor_join_url(&instructor, Some("Test Uni")),
            "https://portal.example/page/instructorCourseJoin?regkey=ik&instructorinstitution=Test+Uni"
        );
    }

    #[test]
    fn test_base_url_path_prefix_is_kept() {
        let course = Course::new("CS101", "Intro");
        for base in ["https://uni.example/portal/", "https://uni.example/portal"] {
            let links = AppLinks::new(base).unwrap();
            assert_eq!(
                links.student_comments_url(&course),
                "https://uni.example/portal/page/studentCommentsPage?courseid=CS101"
            );
        }

        let (course, session, student) = fixtures();
        let links = AppLinks::new("https://uni.example/apps/feedback/?lang=en").unwrap();
        assert_eq!(
            links.student_results_url(&course, &session, &student),
            "https://uni.example/apps/feedback/page/studentFeedbackResultsPage?courseid=CS101&fsname=Quiz+1&regkey=k3y&studentemail=a%40x.com"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(AppLinks::new("not a url").is_err());
    }
}
