use std::{env, fs};

use log::{debug, error};
use serde_derive::Deserialize;
use thiserror::Error;

#[derive(Deserialize, Debug)]
pub struct Config {
    pub app: AppConf,
    pub client: ClientConf,
    pub log: LogConf,
}

#[derive(Deserialize, Debug)]
pub struct LogConf {
    pub file: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Deserialize, Debug)]
pub struct AppConf {
    pub environment: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ClientConf {
    pub droplert_id: Option<String>,
    pub endpoint: String,
    pub website_url: String,
    #[serde(default = "default_initial_path")]
    pub initial_path: String,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    #[serde(default = "default_display_timeout_ms")]
    pub display_timeout_ms: u64,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_initial_path() -> String {
    "/".to_string()
}

fn default_reconnect_delay_ms() -> u64 {
    5000
}

fn default_display_timeout_ms() -> u64 {
    10000
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config File could not be found")]
    ConfigNotFound(std::io::Error),

    #[error("Config File could not be parsed: {0}")]
    ParsingError(toml::de::Error),

    #[error("Env variable could not be found")]
    EnvVarNotFound(std::env::VarError),
}

impl Config {
    pub fn from_any() -> Result<Self, ConfigError> {
        //Try to read from path env var
        let env_result = Self::from_env_path();
        match env_result {
            Ok(config) => {
                debug!("Loaded config from env path");
                return Ok(config.with_env_overrides());
            }
            Err(error) => {
                debug!("Could not load config from env path: {}", error);
            }
        }

        //Try to read default path
        let default_result = Self::from_default_path();
        match default_result {
            Ok(config) => {
                debug!("Loaded config from default path");
                Ok(config.with_env_overrides())
            }
            Err(error) => {
                error!("Could not load config: {}", error);
                Err(error)
            }
        }
    }

    // Read Config from default path
    pub fn from_default_path() -> Result<Self, ConfigError> {
        Self::from_file_path("config.toml")
    }

    // Read Config from path in CONFIG_LOCATION env variable
    pub fn from_env_path() -> Result<Self, ConfigError> {
        let path = env::var("CONFIG_LOCATION").map_err(ConfigError::EnvVarNotFound)?;
        Self::from_file_path(&path)
    }

    // Read and Parse Config from path
    pub fn from_file_path(path: &str) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(ConfigError::ConfigNotFound)?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> Result<Self, ConfigError> {
        toml::from_str(data).map_err(ConfigError::ParsingError)
    }

    // DROPLERT_ID and WS_SERVER_URL win over the file
    fn with_env_overrides(mut self) -> Self {
        if let Ok(id) = env::var("DROPLERT_ID") {
            debug!("Using droplert id from environment");
            self.client.droplert_id = Some(id);
        }
        if let Ok(url) = env::var("WS_SERVER_URL") {
            debug!("Using endpoint from environment");
            self.client.endpoint = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [app]
        environment = "test"

        [client]
        droplert_id = "abc"
        endpoint = "ws://127.0.0.1:9000/ws"
        website_url = "https://example.com"
        initial_path = "/docs"
        reconnect_delay_ms = 250
        display_timeout_ms = 1000

        [log]
        file = "test.log"
        level = "warn"
    "#;

    #[test]
    fn parses_full_config() {
        let config = Config::from_toml(FULL).unwrap();
        assert_eq!(config.app.environment, "test");
        assert_eq!(config.client.droplert_id.as_deref(), Some("abc"));
        assert_eq!(config.client.initial_path, "/docs");
        assert_eq!(config.client.reconnect_delay_ms, 250);
        assert_eq!(config.client.display_timeout_ms, 1000);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_toml(
            r#"
            [app]
            environment = "test"

            [client]
            endpoint = "ws://127.0.0.1:9000/ws"
            website_url = "https://example.com"

            [log]
            file = "test.log"
            "#,
        )
        .unwrap();
        assert!(config.client.droplert_id.is_none());
        assert_eq!(config.client.initial_path, "/");
        assert_eq!(config.client.reconnect_delay_ms, 5000);
        assert_eq!(config.client.display_timeout_ms, 10000);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn rejects_missing_section() {
        let result = Config::from_toml("[app]\nenvironment = \"test\"\n");
        assert!(matches!(result, Err(ConfigError::ParsingError(_))));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = Config::from_file_path("/nonexistent/droplert/config.toml");
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
