// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client for listing activities and refreshing tokens.
//!
//! Handles:
//! - Activity listing (paginated) with retry on server errors
//! - Token refresh when within the expiry margin
//! - Persisting refreshed tokens back to the credential file

use crate::error::AppError;
use crate::models::{CredentialStore, StravaClientConfig, StravaCredentials};
use crate::retry::RetryPolicy;
use serde::Deserialize;

/// Activities requested per page.
const ACTIVITIES_PER_PAGE: u32 = 50;

/// Upper bound on pages read for one lookback window.
const MAX_ACTIVITY_PAGES: u32 = 5;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    oauth_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        oauth_url: impl Into<String>,
        client: &StravaClientConfig,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            oauth_url: oauth_url.into(),
            client_id: client.client_id.clone(),
            client_secret: client.client_secret.clone(),
        }
    }

    /// List activities after a Unix timestamp (one page).
    pub async fn list_activities(
        &self,
        access_token: &str,
        after: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<StravaActivitySummary>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[
                ("after", after.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::transport("strava", e))?;

        check_response_json(response).await
    }

    /// Exchange a refresh token for a new token set.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::transport("strava", format!("Token refresh request failed: {}", e))
            })?;

        check_response_json(response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
        }

        return Err(AppError::status("strava", status.as_u16(), body));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::transport("strava", format!("JSON parse error: {}", e)))
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

impl TokenRefreshResponse {
    /// Overwrite the three token fields; every other stored key is kept.
    pub fn apply_to(self, credentials: StravaCredentials) -> StravaCredentials {
        StravaCredentials {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at,
            ..credentials
        }
    }
}

/// Summary activity for list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaActivitySummary {
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Local wall-clock start, formatted `%Y-%m-%dT%H:%M:%SZ`
    #[serde(default)]
    pub start_date_local: String,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// StravaService - High-level service with token management
// ─────────────────────────────────────────────────────────────────────────────

/// Margin before token expiration when we proactively refresh (5 minutes).
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// High-level Strava service that manages the token lifecycle and API calls.
///
/// The credential file is the single source of truth for auth state; this is
/// the only writer.
#[derive(Clone)]
pub struct StravaService {
    client: StravaClient,
    store: CredentialStore,
    retry: RetryPolicy,
}

impl StravaService {
    pub fn new(client: StravaClient, store: CredentialStore, retry: RetryPolicy) -> Self {
        Self {
            client,
            store,
            retry,
        }
    }

    // ─── Token Management ────────────────────────────────────────────────────

    /// Get a valid access token, refreshing it first if it expires within
    /// the refresh margin.
    ///
    /// On refresh the three token fields are overwritten and the file is
    /// written back, keeping any other keys, before the new token is returned. Failures are
    /// returned unchanged: there is no retry and no fallback to the old token.
    pub async fn get_valid_access_token(&self, now: i64) -> Result<String, AppError> {
        let credentials = self.store.load()?;

        if credentials.seconds_remaining(now) >= TOKEN_REFRESH_MARGIN_SECS {
            tracing::debug!(
                expires_in = credentials.seconds_remaining(now),
                "Strava token is valid"
            );
            return Ok(credentials.access_token);
        }

        tracing::info!(
            expires_in = credentials.seconds_remaining(now),
            "Access token expiring, refreshing"
        );

        let tokens = self
            .client
            .refresh_token(&credentials.refresh_token)
            .await?;
        let refreshed = tokens.apply_to(credentials);

        self.store.save(&refreshed)?;

        tracing::info!(
            expires_at = refreshed.expires_at,
            path = %self.store.path().display(),
            "Strava token refreshed and saved"
        );
        Ok(refreshed.access_token)
    }

    // ─── API Wrappers ────────────────────────────────────────────────────────

    /// Activities that started after `after` (Unix seconds).
    ///
    /// Each page is fetched under the retry policy. Any failure that survives
    /// the policy degrades to an empty list: fitness stats are never worth
    /// aborting the dashboard for.
    pub async fn recent_activities(
        &self,
        access_token: &str,
        after: i64,
    ) -> Vec<StravaActivitySummary> {
        match self.fetch_all_pages(access_token, after).await {
            Ok(activities) => {
                tracing::debug!(count = activities.len(), after, "Fetched Strava activities");
                activities
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error fetching Strava activities");
                if e.http_status() == Some(500) {
                    tracing::warn!(
                        "Strava is returning server errors; data may be available on the next run"
                    );
                }
                Vec::new()
            }
        }
    }

    async fn fetch_all_pages(
        &self,
        access_token: &str,
        after: i64,
    ) -> Result<Vec<StravaActivitySummary>, AppError> {
        let mut activities = Vec::new();

        for page in 1..=MAX_ACTIVITY_PAGES {
            let batch = self
                .retry
                .run(|_| {
                    self.client
                        .list_activities(access_token, after, page, ACTIVITIES_PER_PAGE)
                })
                .await?;

            let short_page = batch.len() < ACTIVITIES_PER_PAGE as usize;
            activities.extend(batch);
            if short_page {
                break;
            }
        }

        Ok(activities)
    }
}
