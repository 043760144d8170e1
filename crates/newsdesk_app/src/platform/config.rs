use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use newsdesk_engine::{ApiSettings, Environment};
use newsdesk_logging::newsdesk_info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::{LogDestination, LogLevel, LogSettings, DEFAULT_LOG_FILE};

const CONFIG_FILENAME: &str = "newsdesk.ron";
const CONFIG_PATH_VAR: &str = "NEWSDESK_CONFIG";
const ENVIRONMENT_VAR: &str = "NEWSDESK_ENV";
const BASE_URL_VAR: &str = "NEWSDESK_API_BASE_URL";
const LOG_LEVEL_VAR: &str = "NEWSDESK_LOG_LEVEL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown environment {0:?} (expected development or production)")]
    UnknownEnvironment(String),
    #[error("unknown log level {0:?} (expected off, error, warn, info, debug or trace)")]
    UnknownLogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnvironmentSetting {
    #[default]
    Development,
    Production,
}

impl From<Environment> for EnvironmentSetting {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Development => EnvironmentSetting::Development,
            Environment::Production => EnvironmentSetting::Production,
        }
    }
}

impl From<EnvironmentSetting> for Environment {
    fn from(setting: EnvironmentSetting) -> Self {
        match setting {
            EnvironmentSetting::Development => Environment::Development,
            EnvironmentSetting::Production => Environment::Production,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: EnvironmentSetting,
    /// Overrides the environment's default backend location.
    pub base_url: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = ApiSettings::default();
        Self {
            environment: EnvironmentSetting::default(),
            base_url: None,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn api_settings(&self) -> ApiSettings {
        let settings = ApiSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ApiSettings::for_environment(self.environment.into())
        };
        match &self.base_url {
            Some(base_url) => settings.with_base_url(base_url.clone()),
            None => settings,
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            destination: self.log_destination,
            level: self.log_level,
            file: self.log_file.clone(),
        }
    }

    fn apply_overrides(
        &mut self,
        environment: Option<String>,
        base_url: Option<String>,
        log_level: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(label) = environment.filter(|label| !label.trim().is_empty()) {
            let parsed = Environment::from_label(&label)
                .ok_or(ConfigError::UnknownEnvironment(label))?;
            self.environment = parsed.into();
        }
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = Some(base_url);
        }
        if let Some(label) = log_level.filter(|label| !label.trim().is_empty()) {
            self.log_level =
                LogLevel::from_label(&label).ok_or(ConfigError::UnknownLogLevel(label))?;
        }
        Ok(())
    }
}

/// Loads `newsdesk.ron` (or the file named by `NEWSDESK_CONFIG`) and applies
/// environment overrides. A missing default file is not an error.
pub fn load() -> Result<AppConfig, ConfigError> {
    let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    let required = explicit.is_some();
    let path = explicit.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    let mut config = load_file(&path, required)?;
    config.apply_overrides(
        std::env::var(ENVIRONMENT_VAR).ok(),
        std::env::var(BASE_URL_VAR).ok(),
        std::env::var(LOG_LEVEL_VAR).ok(),
    )?;
    Ok(config)
}

fn load_file(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    newsdesk_info!("Loaded configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_default_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_file(&temp.path().join(CONFIG_FILENAME), false).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(
            config.api_settings().listing_url(),
            "http://localhost:5000/api/scrape"
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_file(&temp.path().join("absent.ron"), true).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "(environment: Production, request_timeout_secs: 5, log_destination: Both)",
        )
        .unwrap();

        let config = load_file(&path, true).unwrap();
        assert_eq!(config.environment, EnvironmentSetting::Production);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, LogLevel::Info);

        let settings = config.api_settings();
        assert_eq!(settings.base_url, "/.netlify/functions");
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "(environment: Staging)").unwrap();

        let err = load_file(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig {
            base_url: Some("http://file.example.com/api".to_string()),
            ..AppConfig::default()
        };
        config
            .apply_overrides(
                Some("production".to_string()),
                Some("https://deploy.example.com/.netlify/functions".to_string()),
                None,
            )
            .unwrap();

        assert_eq!(config.environment, EnvironmentSetting::Production);
        assert_eq!(
            config.api_settings().article_url(),
            "https://deploy.example.com/.netlify/functions/scrape-article"
        );
    }

    #[test]
    fn blank_overrides_are_ignored_and_bad_environment_rejected() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(Some("  ".to_string()), Some(String::new()), Some(" ".to_string()))
            .unwrap();
        assert_eq!(config, AppConfig::default());

        let err = config
            .apply_overrides(Some("staging".to_string()), None, None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(label) if label == "staging"));

        let err = config
            .apply_overrides(None, None, Some("loud".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLogLevel(label) if label == "loud"));
    }

    #[test]
    fn log_level_and_file_come_from_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"(log_destination: Terminal, log_level: Debug, log_file: "logs/run.log")"#,
        )
        .unwrap();

        let mut config = load_file(&path, true).unwrap();
        assert_eq!(
            config.log_settings(),
            LogSettings {
                destination: LogDestination::Terminal,
                level: LogLevel::Debug,
                file: PathBuf::from("logs/run.log"),
            }
        );

        config
            .apply_overrides(None, None, Some("trace".to_string()))
            .unwrap();
        assert_eq!(config.log_settings().level, LogLevel::Trace);
        assert_eq!(AppConfig::default().log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }
}
