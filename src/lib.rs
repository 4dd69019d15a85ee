// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! RuneSync: a RuneScape-styled personal dashboard.
//!
//! Weekly Strava totals, Grand Exchange prices, the local weather and the
//! latest game news are gathered from their APIs and drawn onto a fixed
//! background image.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod render;
pub mod retry;
pub mod services;
pub mod time_utils;

use anyhow::Context;
use config::{load_json, Config};
use error::AppError;
use models::{CredentialStore, StravaClientConfig, UserPreferences, WeatherConfig};
use render::Compositor;
use retry::RetryPolicy;
use services::{
    ItemCatalog, NewsService, PriceClient, PriceService, StravaClient, StravaService,
    WeatherClient, WeatherService,
};
use std::sync::Arc;
use std::time::Duration;

/// Item catalog file in the resources directory.
pub const CATALOG_FILE: &str = "osrs_items.txt";

/// Shared application state, built once by [`AppState::initialize`].
pub struct AppState {
    pub config: Config,
    pub preferences: UserPreferences,
    pub strava: StravaService,
    pub prices: PriceService,
    pub weather: WeatherService,
    pub news: NewsService,
    pub compositor: Compositor,
}

impl AppState {
    /// Load every config file and resource and wire up the services.
    ///
    /// Any failure here is fatal for the run.
    pub fn initialize(config: Config) -> Result<Self, AppError> {
        let preferences: UserPreferences = load_json(&config.preferences_path)?;
        let client_config: StravaClientConfig = load_json(&config.client_config_path)?;
        let weather_config: WeatherConfig = load_json(&config.weather_config_path)?;

        let store = CredentialStore::new(&config.credentials_path);
        // Fail before any network traffic if the credential file is unusable
        store.load()?;

        let catalog = Arc::new(ItemCatalog::load_from_file(config.resource(CATALOG_FILE))?);
        let compositor = Compositor::load(&config.resources_dir)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let strava = StravaService::new(
            StravaClient::new(
                http.clone(),
                &config.strava_api_base,
                &config.strava_oauth_url,
                &client_config,
            ),
            store,
            RetryPolicy::server_errors(),
        );
        let prices = PriceService::new(
            PriceClient::new(http.clone(), &config.prices_api_base),
            catalog,
        );
        let weather = WeatherService::new(WeatherClient::new(
            http.clone(),
            weather_config,
            preferences.weather.default_units,
        ));
        let news = NewsService::new(http, &config.news_url);

        tracing::info!(
            tracked_item = %preferences.tracked_item,
            city = %preferences.weather.chosen_city,
            units = preferences.weather.default_units.as_str(),
            "Application state initialized"
        );

        Ok(Self {
            config,
            preferences,
            strava,
            prices,
            weather,
            news,
            compositor,
        })
    }
}
