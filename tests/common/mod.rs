// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::Router;
use runesync::models::{CredentialStore, StravaClientConfig, StravaCredentials};
use runesync::retry::RetryPolicy;
use runesync::services::{StravaClient, StravaService};
use std::path::PathBuf;
use std::time::Duration;

/// Directory with the real background and fonts, if provided.
#[allow(dead_code)]
pub fn resources_dir() -> Option<PathBuf> {
    std::env::var("RUNESYNC_TEST_RESOURCES")
        .ok()
        .map(PathBuf::from)
}

/// Skip test with message if the font and background assets are not available.
#[macro_export]
macro_rules! require_resources {
    () => {
        match crate::common::resources_dir() {
            Some(dir) => dir,
            None => {
                eprintln!("⚠️  Skipping: RUNESYNC_TEST_RESOURCES not set");
                return;
            }
        }
    };
}

/// Serve a fake upstream on an ephemeral localhost port.
/// Returns the base URL, e.g. `http://127.0.0.1:41234`.
#[allow(dead_code)]
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Fake upstream server failed");
    });

    format!("http://{}", addr)
}

/// Write a credential file expiring at `expires_at` and return its store.
#[allow(dead_code)]
pub fn credential_store(dir: &tempfile::TempDir, expires_at: i64) -> CredentialStore {
    let store = CredentialStore::new(dir.path().join("strava_auth.json"));
    store
        .save(&StravaCredentials {
            access_token: "old_access".to_string(),
            refresh_token: "old_refresh".to_string(),
            expires_at,
            extra: Default::default(),
        })
        .expect("Failed to write credential file");
    store
}

/// Strava service pointed at a fake server, with millisecond backoff.
#[allow(dead_code)]
pub fn strava_service(base_url: &str, store: CredentialStore) -> StravaService {
    let client = StravaClient::new(
        reqwest::Client::new(),
        format!("{}/api/v3", base_url),
        format!("{}/oauth/token", base_url),
        &StravaClientConfig {
            client_id: "test_client".to_string(),
            client_secret: "test_secret".to_string(),
        },
    );
    StravaService::new(
        client,
        store,
        RetryPolicy::server_errors().with_backoff_step(Duration::from_millis(5)),
    )
}
