// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth credentials and the file that persists them.

use crate::config::{load_json, ConfigError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// The user's Strava tokens, persisted as the only durable auth state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StravaCredentials {
    pub access_token: String,
    pub refresh_token: String,
    /// When the access token expires (Unix seconds)
    #[serde(default)]
    pub expires_at: i64,
    /// Other keys from the OAuth exchange (`athlete`, `token_type`, ...),
    /// written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StravaCredentials {
    /// Seconds left before the access token expires.
    pub fn seconds_remaining(&self, now: i64) -> i64 {
        self.expires_at - now
    }
}

/// OAuth application credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaClientConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// JSON file holding the credential set, rewritten in place on refresh.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StravaCredentials, ConfigError> {
        load_json(&self.path)
    }

    /// Overwrite the file with the given credentials (pretty JSON, 2-space indent).
    pub fn save(&self, credentials: &StravaCredentials) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, json)
    }
}
