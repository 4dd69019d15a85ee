// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The environment only names files and endpoints. The JSON files themselves
//! (credentials, preferences, weather) are loaded once by `AppState::initialize`.

use std::env;
use std::path::PathBuf;

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Local files ---
    /// Strava credential set (rewritten on token refresh)
    pub credentials_path: PathBuf,
    /// Strava OAuth client id/secret
    pub client_config_path: PathBuf,
    /// Fitness targets, weather city and tracked item
    pub preferences_path: PathBuf,
    /// Weather API key and endpoint URLs
    pub weather_config_path: PathBuf,
    /// Directory holding the background, fonts and item catalog
    pub resources_dir: PathBuf,
    /// Where the rendered dashboard PNG is written
    pub output_path: PathBuf,

    // --- Remote endpoints ---
    pub strava_api_base: String,
    pub strava_oauth_url: String,
    pub prices_api_base: String,
    pub news_url: String,

    // --- Runtime ---
    /// Timeout applied to every outbound HTTP request
    pub http_timeout_secs: u64,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config with the production endpoints and relative file paths.
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("strava_auth.json"),
            client_config_path: PathBuf::from("strava_config.json"),
            preferences_path: PathBuf::from("user_preferences.json"),
            weather_config_path: PathBuf::from("weather_config.json"),
            resources_dir: PathBuf::from("resources"),
            output_path: PathBuf::from("runesync.png"),
            strava_api_base: "https://www.strava.com/api/v3".to_string(),
            strava_oauth_url: "https://www.strava.com/oauth/token".to_string(),
            prices_api_base: "https://prices.runescape.wiki/api/v1/osrs".to_string(),
            news_url: "https://oldschool.runescape.com/".to_string(),
            http_timeout_secs: 30,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let http_timeout_secs = match env::var("RUNESYNC_HTTP_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("RUNESYNC_HTTP_TIMEOUT_SECS", v))?,
            Err(_) => defaults.http_timeout_secs,
        };

        let log_format = match env::var("RUNESYNC_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(other) => {
                return Err(ConfigError::Invalid(
                    "RUNESYNC_LOG_FORMAT",
                    other.to_string(),
                ))
            }
        };

        Ok(Self {
            credentials_path: path_var("RUNESYNC_CREDENTIALS_PATH", defaults.credentials_path),
            client_config_path: path_var(
                "RUNESYNC_CLIENT_CONFIG_PATH",
                defaults.client_config_path,
            ),
            preferences_path: path_var("RUNESYNC_PREFERENCES_PATH", defaults.preferences_path),
            weather_config_path: path_var(
                "RUNESYNC_WEATHER_CONFIG_PATH",
                defaults.weather_config_path,
            ),
            resources_dir: path_var("RUNESYNC_RESOURCES_DIR", defaults.resources_dir),
            output_path: path_var("RUNESYNC_OUTPUT_PATH", defaults.output_path),
            strava_api_base: env::var("STRAVA_API_BASE").unwrap_or(defaults.strava_api_base),
            strava_oauth_url: env::var("STRAVA_OAUTH_URL").unwrap_or(defaults.strava_oauth_url),
            prices_api_base: env::var("OSRS_PRICES_BASE").unwrap_or(defaults.prices_api_base),
            news_url: env::var("OSRS_NEWS_URL").unwrap_or(defaults.news_url),
            http_timeout_secs,
            log_format,
        })
    }

    /// Path of a file inside the resources directory.
    pub fn resource(&self, name: &str) -> PathBuf {
        self.resources_dir.join(name)
    }
}

fn path_var(name: &str, default: PathBuf) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl From<ConfigError> for crate::error::AppError {
    fn from(err: ConfigError) -> Self {
        crate::error::AppError::Config(err.to_string())
    }
}

/// Read and deserialize a JSON config file.
pub fn load_json<T, P>(path: P) -> Result<T, ConfigError>
where
    T: for<'de> serde::Deserialize<'de>,
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
