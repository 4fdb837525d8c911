//! Configuration loading and validation for mathtutor.
//!
//! Loads configuration from `~/.mathtutor/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.mathtutor/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Slack credentials and behavior
    #[serde(default)]
    pub slack: SlackConfig,

    /// Plot rendering defaults
    #[serde(default)]
    pub plot: PlotConfig,

    /// Default log level (overridden by MATHTUTOR_LOG_LEVEL / RUST_LOG)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("slack", &self.slack)
            .field("plot", &self.plot)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Slack connection and behavior settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token (xoxb-...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// App-level token (xapp-...) for Socket Mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_token: Option<String>,

    /// Reaction used to acknowledge a matched message
    #[serde(default = "default_ack_reaction")]
    pub ack_reaction: String,
}

fn default_ack_reaction() -> String {
    "brain".into()
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            app_token: None,
            ack_reaction: default_ack_reaction(),
        }
    }
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackConfig")
            .field("bot_token", &redact(&self.bot_token))
            .field("app_token", &redact(&self.app_token))
            .field("ack_reaction", &self.ack_reaction)
            .finish()
    }
}

/// Defaults for the plot_function tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_x_min")]
    pub x_min: f64,

    #[serde(default = "default_x_max")]
    pub x_max: f64,

    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_x_min() -> f64 {
    -10.0
}
fn default_x_max() -> f64 {
    10.0
}
fn default_points() -> usize {
    1000
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_min: default_x_min(),
            x_max: default_x_max(),
            points: default_points(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.mathtutor/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `SLACK_BOT_TOKEN`
    /// - `SLACK_APP_TOKEN`
    /// - `MATHTUTOR_LOG_LEVEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(token) = std::env::var("SLACK_BOT_TOKEN") {
            config.slack.bot_token = Some(token);
        }
        if let Ok(token) = std::env::var("SLACK_APP_TOKEN") {
            config.slack.app_token = Some(token);
        }
        if let Ok(level) = std::env::var("MATHTUTOR_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".mathtutor")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.plot.x_min >= self.plot.x_max {
            return Err(ConfigError::ValidationError(
                "plot.x_min must be less than plot.x_max".into(),
            ));
        }
        if self.plot.points < 2 {
            return Err(ConfigError::ValidationError(
                "plot.points must be at least 2".into(),
            ));
        }
        Ok(())
    }

    /// Whether both Slack tokens are present.
    pub fn has_slack_credentials(&self) -> bool {
        self.slack.bot_token.is_some() && self.slack.app_token.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            slack: SlackConfig::default(),
            plot: PlotConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slack.ack_reaction, "brain");
        assert_eq!(config.plot.points, 1000);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.plot.x_min, config.plot.x_min);
        assert_eq!(parsed.log_level, config.log_level);
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert!(!result.unwrap().has_slack_credentials());
    }

    #[test]
    fn invalid_plot_range_rejected() {
        let mut config = AppConfig::default();
        config.plot.x_min = 5.0;
        config.plot.x_max = -5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[slack]
bot_token = "xoxb-test"
app_token = "xapp-test"
ack_reaction = "bulb"

[plot]
x_min = -5.0
x_max = 5.0
points = 200
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert!(config.has_slack_credentials());
        assert_eq!(config.slack.ack_reaction, "bulb");
        assert_eq!(config.plot.points, 200);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn debug_redacts_tokens() {
        let config = AppConfig {
            slack: SlackConfig {
                bot_token: Some("xoxb-secret".into()),
                app_token: Some("xapp-secret".into()),
                ack_reaction: default_ack_reaction(),
            },
            ..AppConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
