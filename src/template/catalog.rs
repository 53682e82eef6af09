//! Built-in email templates and fragments.
//!
//! Every template is a plain string with `${token}` placeholders. Fragments
//! are spliced into a template through `${joinFragment}` before the main
//! bindings are applied, so tokens inside a fragment are bound by the same
//! pass as the surrounding template.

/// Placeholder tokens shared by the templates and the email generator
pub mod tokens {
    pub const APP_NAME: &str = "${appName}";
    pub const SUPPORT_EMAIL: &str = "${supportEmail}";
    pub const APP_VERSION: &str = "${appVersion}";

    pub const USER_NAME: &str = "${userName}";
    pub const COURSE_ID: &str = "${courseId}";
    pub const COURSE_NAME: &str = "${courseName}";
    pub const SESSION_NAME: &str = "${feedbackSessionName}";
    pub const DEADLINE: &str = "${deadline}";
    pub const STATUS: &str = "${status}";
    pub const INSTRUCTOR_FRAGMENT: &str = "${instructorFragment}";
    pub const SUBMIT_URL: &str = "${submitUrl}";
    pub const REPORT_URL: &str = "${reportUrl}";
    pub const COMMENTS_PAGE_URL: &str = "${commentsPageUrl}";
    pub const JOIN_FRAGMENT: &str = "${joinFragment}";
    pub const JOIN_URL: &str = "${joinUrl}";

    pub const ACTUAL_USER: &str = "${actualUser}";
    pub const REQUEST_METHOD: &str = "${requestMethod}";
    pub const REQUEST_USER_AGENT: &str = "${requestUserAgent}";
    pub const REQUEST_URL: &str = "${requestUrl}";
    pub const REQUEST_PATH: &str = "${requestPath}";
    pub const REQUEST_PARAMETERS: &str = "${requestParameters}";
    pub const ERROR_MESSAGE: &str = "${errorMessage}";
    pub const STACK_TRACE: &str = "${stackTrace}";
}

/// Session opening and reminder email
pub const USER_FEEDBACK_SESSION: &str = r#"<p>Hello ${userName},</p>
${instructorFragment}
<p>The following feedback session ${status}:<br>
Course: [${courseId}] ${courseName}<br>
Feedback Session Name: ${feedbackSessionName}<br>
Deadline: ${deadline}</p>
<p>To submit your responses, go to: <a href="${submitUrl}">${submitUrl}</a></p>
<p>Once results are published they will be available at: <a href="${reportUrl}">${reportUrl}</a></p>
<p>If the links do not work, copy them into the address bar of your browser.
Contact ${supportEmail} if you run into any problem.</p>
<p>Regards,<br>${appName} Team</p>
"#;

/// Session closing email, sent to students who have not finished
pub const USER_FEEDBACK_SESSION_CLOSING: &str = r#"<p>Hello ${userName},</p>
${instructorFragment}
<p>The following feedback session ${status} and you have not completed it yet:<br>
Course: [${courseId}] ${courseName}<br>
Feedback Session Name: ${feedbackSessionName}<br>
Deadline: ${deadline}</p>
${joinFragment}
<p>To submit your responses before the deadline, go to: <a href="${submitUrl}">${submitUrl}</a></p>
<p>Results will be available at: <a href="${reportUrl}">${reportUrl}</a></p>
<p>If the links do not work, copy them into the address bar of your browser.
Contact ${supportEmail} if you run into any problem.</p>
<p>Regards,<br>${appName} Team</p>
"#;

/// Session results published email
pub const USER_FEEDBACK_SESSION_PUBLISHED: &str = r#"<p>Hello ${userName},</p>
${instructorFragment}
<p>The results of the following feedback session have been published:<br>
Course: [${courseId}] ${courseName}<br>
Feedback Session Name: ${feedbackSessionName}</p>
<p>To view the results, go to: <a href="${reportUrl}">${reportUrl}</a></p>
<p>If the link does not work, copy it into the address bar of your browser.
Contact ${supportEmail} if you run into any problem.</p>
<p>Regards,<br>${appName} Team</p>
"#;

/// Notification that pending comments have been released to a student
pub const USER_PENDING_COMMENTS_CLEARED: &str = r#"<p>Hello ${userName},</p>
<p>You have new comments in course [${courseId}] ${courseName}.</p>
${joinFragment}
<p>To view the comments, go to: <a href="${commentsPageUrl}">${commentsPageUrl}</a></p>
<p>Regards,<br>${appName} Team</p>
"#;

/// Welcome email for a newly approved instructor account
pub const NEW_INSTRUCTOR_ACCOUNT_WELCOME: &str = r#"<p>Hello ${userName},</p>
<p>Your instructor account request has been approved.</p>
<p>To activate your account, go to: <a href="${joinUrl}">${joinUrl}</a></p>
<p>After activating, you can set up your first course. Reply to this email or
contact ${supportEmail} if you need help.</p>
<p>Regards,<br>${appName} Team</p>
"#;

/// Course join invitation; the fragment decides student, rejoin or instructor wording
pub const USER_COURSE_JOIN: &str = r#"<p>Hello ${userName},</p>
${joinFragment}
<p>If you think you received this email by mistake, contact ${supportEmail}.</p>
<p>Regards,<br>${appName} Team</p>
"#;

pub const FRAGMENT_STUDENT_COURSE_JOIN: &str = r#"<p>You have been added to the course ${courseName} but have not joined it yet.
To join the course, go to: <a href="${joinUrl}">${joinUrl}</a></p>
"#;

pub const FRAGMENT_STUDENT_COURSE_REJOIN_AFTER_RESET: &str = r#"<p>Your account for the course ${courseName} has been reset.
To link your account with the course again, go to: <a href="${joinUrl}">${joinUrl}</a></p>
"#;

pub const FRAGMENT_INSTRUCTOR_COURSE_JOIN: &str = r#"<p>You have been invited to join the course ${courseName} as an instructor.
To accept the invitation, go to: <a href="${joinUrl}">${joinUrl}</a></p>
"#;

/// Internal report of an unexpected server error
pub const SYSTEM_ERROR: &str = r#"<b>Error Message</b><br><pre><code>${errorMessage}</code></pre>
<b>Actual user</b>: ${actualUser}<br>
<b>Request Method</b>: ${requestMethod}<br>
<b>User Agent</b>: ${requestUserAgent}<br>
<b>Request Url</b>: ${requestUrl}<br>
<b>Request Path</b>: ${requestPath}<br>
<b>Request Parameters</b>: ${requestParameters}<br>
<b>Stack Trace</b><br><pre><code>${stackTrace}</code></pre>
"#;
