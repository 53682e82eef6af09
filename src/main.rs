use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use course_mailer::config::Settings;
use course_mailer::data::{CourseDirectory, Dataset, InMemoryDirectory};
use course_mailer::email::{
    AppLinks, Collaborators, EmailGenerator, EmailMessage, GeneratedEmails, GeneratorConfig,
};
use course_mailer::telemetry::init_telemetry;

#[derive(Parser, Debug)]
#[command(name = "course-mailer")]
#[command(author, version, about = "Generate course notification emails", long_about = None)]
struct Cli {
    /// JSON dataset with courses, sessions, rosters and comments
    #[arg(short, long, env = "MAILER_DATASET")]
    dataset: PathBuf,

    /// Additional configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override log level
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Course id
    #[arg(long)]
    course: String,

    /// Feedback session name
    #[arg(long)]
    session: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Session opening emails
    Opening(SessionArgs),
    /// Session closing emails for students yet to submit
    Closing(SessionArgs),
    /// Session results published emails
    Published(SessionArgs),
    /// Session reminder emails for selected users
    Reminder {
        #[command(flatten)]
        target: SessionArgs,
        /// Student email to remind (repeatable)
        #[arg(long = "student")]
        students: Vec<String>,
        /// Instructor email to remind with their own links (repeatable)
        #[arg(long = "remind")]
        remind: Vec<String>,
        /// Instructor email to receive the student copy (repeatable)
        #[arg(long = "notify")]
        notify: Vec<String>,
    },
    /// Released comments notification
    PendingComments {
        #[arg(long)]
        course: String,
    },
    /// Welcome email for an approved instructor account
    InstructorAccount {
        #[arg(long)]
        course: String,
        #[arg(long)]
        instructor: String,
        #[arg(long)]
        short_name: String,
        #[arg(long)]
        institute: String,
    },
    /// Course join invitation for a student
    StudentJoin {
        #[arg(long)]
        course: String,
        #[arg(long)]
        student: String,
    },
    /// Course rejoin invitation after an account reset
    StudentRejoin {
        #[arg(long)]
        course: String,
        #[arg(long)]
        student: String,
    },
    /// Course join invitation for an instructor
    InstructorJoin {
        #[arg(long)]
        course: String,
        #[arg(long)]
        instructor: String,
    },
    /// Severe log digest from a text file
    Logs {
        #[arg(long)]
        file: PathBuf,
    },
    /// Free-form admin email
    Admin {
        #[arg(long)]
        recipient: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        content: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }
    init_telemetry(&settings.logging)?;
    tracing::debug!(app = %settings.app.name, version = %settings.app.version, "Configuration loaded");

    let dataset = Dataset::load(&cli.dataset)
        .with_context(|| format!("Failed to load dataset {}", cli.dataset.display()))?;
    let directory = Arc::new(InMemoryDirectory::new(dataset));
    let links = Arc::new(AppLinks::new(&settings.app.base_url)?);
    let generator = EmailGenerator::new(
        GeneratorConfig::from(&settings),
        Collaborators::from_directory(directory.clone(), links),
    );

    let generated = run(&generator, &directory, cli.command)?;

    for diagnostic in &generated.diagnostics {
        tracing::warn!(diagnostic = ?diagnostic, "{}", diagnostic);
    }
    tracing::info!(count = generated.len(), "Emails generated");

    println!("{}", serde_json::to_string_pretty(&generated)?);
    Ok(())
}

fn run(
    generator: &EmailGenerator,
    directory: &InMemoryDirectory,
    command: Command,
) -> Result<GeneratedEmails> {
    let generated = match command {
        Command::Opening(target) => {
            let session = directory.session(&target.course, &target.session)?;
            generator.session_opening_emails(&session)?
        }
        Command::Closing(target) => {
            let session = directory.session(&target.course, &target.session)?;
            generator.session_closing_emails(&session)?
        }
        Command::Published(target) => {
            let session = directory.session(&target.course, &target.session)?;
            generator.session_published_emails(&session)?
        }
        Command::Reminder {
            target,
            students,
            remind,
            notify,
        } => {
            let session = directory.session(&target.course, &target.session)?;
            let students = students
                .iter()
                .map(|email| directory.student(&target.course, email))
                .collect::<Result<Vec<_>, _>>()?;
            let remind = remind
                .iter()
                .map(|email| directory.instructor(&target.course, email))
                .collect::<Result<Vec<_>, _>>()?;
            let notify = notify
                .iter()
                .map(|email| directory.instructor(&target.course, email))
                .collect::<Result<Vec<_>, _>>()?;
            generator.session_reminder_emails(&session, &students, &remind, &notify)?
        }
        Command::PendingComments { course } => generator.pending_comments_cleared_emails(&course)?,
        Command::InstructorAccount {
            course,
            instructor,
            short_name,
            institute,
        } => {
            let instructor = directory.instructor(&course, &instructor)?;
            single(generator.new_instructor_account_email(&instructor, &short_name, &institute))
        }
        Command::StudentJoin { course, student } => {
            let student = directory.student(&course, &student)?;
            let course = directory.course(&course)?;
            single(generator.student_course_join_email(&course, &student))
        }
        Command::StudentRejoin { course, student } => {
            let student = directory.student(&course, &student)?;
            let course = directory.course(&course)?;
            single(generator.student_course_rejoin_email(&course, &student))
        }
        Command::InstructorJoin { course, instructor } => {
            let instructor = directory.instructor(&course, &instructor)?;
            let course = directory.course(&course)?;
            single(generator.instructor_course_join_email(&course, &instructor))
        }
        Command::Logs { file } => {
            let logs = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read log file {}", file.display()))?;
            single(generator.compiled_logs_email(&logs))
        }
        Command::Admin {
            recipient,
            subject,
            content,
        } => single(generator.admin_email(&content, &subject, &recipient)),
    };

    Ok(generated)
}

fn single(message: EmailMessage) -> GeneratedEmails {
    GeneratedEmails::new(vec![message])
}
