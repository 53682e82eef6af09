//! Notification email generation.
//!
//! [`EmailGenerator`] turns course, session and roster records into
//! [`EmailMessage`] values for each [`EmailKind`]. Lookups are delegated to
//! the traits in [`crate::data`] and links to a [`LinkBuilder`].
//!
//! # Example
//!
//! ```ignore
//! let directory = Arc::new(InMemoryDirectory::new(Dataset::load("data.json")?));
//! let links = Arc::new(AppLinks::new(&settings.app.base_url)?);
//! let generator = EmailGenerator::new(
//!     GeneratorConfig::from(&settings),
//!     Collaborators::from_directory(directory.clone(), links),
//! );
//!
//! let session = directory.session("CS101", "Quiz1")?;
//! let generated = generator.session_opening_emails(&session)?;
//! ```

mod generator;
mod kind;
pub mod links;
mod message;
mod time;
mod types;

pub use generator::{Collaborators, EmailGenerator, GeneratorConfig};
pub use kind::EmailKind;
pub use links::{AppLinks, LinkBuilder};
pub use message::{EmailMessage, Sender};
pub use time::format_deadline;
pub use types::{Diagnostic, EmailError, EmailResult, GeneratedEmails};
