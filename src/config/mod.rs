mod settings;

pub use settings::{AppConfig, EmailConfig, LoggingConfig, Settings};
