//! Email template system.
//!
//! This module provides:
//! - Built-in email templates and fragments with `${token}` placeholders
//! - An ordered binding list for placeholder values
//! - A literal, single-pass substitution engine
//!
//! # Example
//!
//! ```
//! use course_mailer::template::{render, Bindings};
//!
//! let bindings = Bindings::new()
//!     .bind("${userName}", "Alice")
//!     .bind("${courseName}", "Intro");
//!
//! let body = render("Hello ${userName}, welcome to ${courseName}.", &bindings);
//! assert_eq!(body, "Hello Alice, welcome to Intro.");
//! ```

pub mod catalog;
mod substitution;
mod types;

pub use catalog::tokens;
pub use substitution::{placeholders, render};
pub use types::Bindings;
