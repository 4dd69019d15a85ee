// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credentials;
pub mod news;
pub mod preferences;
pub mod price;
pub mod weather;

pub use credentials::{CredentialStore, StravaClientConfig, StravaCredentials};
pub use news::NewsArticle;
pub use preferences::{FitnessTargets, Units, UserPreferences};
pub use price::{LatestPrice, PricePoint};
pub use weather::WeatherConfig;
