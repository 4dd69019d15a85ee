// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by every service.

/// Application error type.
///
/// Fatal errors (configuration, credentials, resources) bubble up to `main`.
/// Per-feature errors are logged by the dashboard and the affected field is
/// left blank.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{service} request failed: {message}")]
    Upstream {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("Could not resolve item: {0}")]
    Resolve(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build an upstream error from a non-success HTTP status.
    pub fn status(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        AppError::Upstream {
            service,
            status: Some(status),
            message: format!("HTTP {}: {}", status, body.into()),
        }
    }

    /// Build an upstream error from a transport or decode failure.
    pub fn transport(service: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Upstream {
            service,
            status: None,
            message: err.to_string(),
        }
    }

    /// HTTP status code of an upstream failure, if the server answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            AppError::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether this error means the Strava credentials were rejected.
    pub fn is_strava_token_error(&self) -> bool {
        matches!(
            self,
            AppError::Upstream {
                service: "strava",
                status: Some(401),
                ..
            }
        )
    }
}

/// Result type alias for services
pub type Result<T> = std::result::Result<T, AppError>;
