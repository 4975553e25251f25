use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the booking backend's API.
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    /// Where the session file lives (stands in for browser local storage).
    #[serde(default = "Config::default_session_file")]
    pub session_file: PathBuf,
    /// Overall request timeout in seconds (default: 30)
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds (default: 10)
    #[serde(default = "Config::default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            session_file: Self::default_session_file(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            connect_timeout_secs: Self::default_connect_timeout_secs(),
        }
    }
}

impl Config {
    fn default_api_base_url() -> String {
        "https://metrobooking.onrender.com/api".to_string()
    }
    fn default_session_file() -> PathBuf {
        PathBuf::from("session.json")
    }
    fn default_request_timeout_secs() -> u64 {
        30
    }
    fn default_connect_timeout_secs() -> u64 {
        10
    }

    /// Load config from a YAML file. A missing file yields the defaults so
    /// the client works out of the box against the hosted backend.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::ReadError(e.to_string())),
        };

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}
