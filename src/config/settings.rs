use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Product name used in subjects and signatures
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Version reported in error and log digest subjects
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Absolute base for links embedded in emails
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_sender_email")]
    pub sender_email: String,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
    #[serde(default = "default_reply_to")]
    pub reply_to: String,
    /// Recipient of system error reports and log digests
    #[serde(default = "default_support_email")]
    pub support_email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_app_name() -> String {
    "Course Portal".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_sender_email() -> String {
    "admin@course-portal.example".to_string()
}

fn default_sender_name() -> String {
    "Course Portal Admin".to_string()
}

fn default_reply_to() -> String {
    "help@course-portal.example".to_string()
}

fn default_support_email() -> String {
    "support@course-portal.example".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None::<&Path>)
    }

    /// Load settings, layering an optional explicit file above the
    /// `config/` directory files and below environment variables.
    pub fn load(config_file: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("app.name", default_app_name())?
            .set_default("app.version", default_app_version())?
            .set_default("app.base_url", default_base_url())?
            .set_default("logging.level", default_log_level())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path.as_ref()).required(true));
        }

        // MAILER__EMAIL__SENDER_EMAIL, MAILER__APP__BASE_URL, etc.
        let builder = builder.add_source(
            Environment::with_prefix("MAILER")
                .prefix_separator("__")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            base_url: default_base_url(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
            reply_to: default_reply_to(),
            support_email: default_support_email(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.app.name, "Course Portal");
        assert_eq!(settings.app.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(settings.app.base_url, "http://localhost:8080");
        assert_eq!(settings.email.sender_name, "Course Portal Admin");
        assert_eq!(settings.logging.level, "info");
        assert!(!settings.logging.json);
    }

    #[test]
    fn test_partial_email_section_uses_defaults() {
        let email: EmailConfig =
            serde_json::from_str(r#"{"sender_email": "noreply@uni.example"}"#).unwrap();
        assert_eq!(email.sender_email, "noreply@uni.example");
        assert_eq!(email.support_email, "support@course-portal.example");
    }

    #[test]
    fn test_env_overrides_keep_string_values() {
        env::set_var("MAILER__APP__VERSION", "2.0");
        env::set_var("MAILER__LOGGING__JSON", "true");

        let settings = Settings::new();

        env::remove_var("MAILER__APP__VERSION");
        env::remove_var("MAILER__LOGGING__JSON");

        let settings = settings.unwrap();
        assert_eq!(settings.app.version, "2.0");
        assert!(settings.logging.json);
    }
}
