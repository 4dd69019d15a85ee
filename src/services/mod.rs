// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream clients and the logic built on them.

pub mod catalog;
pub mod fitness;
pub mod news;
pub mod prices;
pub mod strava;
pub mod weather;

pub use catalog::{CatalogError, ItemCatalog, ItemMatch, ItemRef};
pub use fitness::{progress_percentage, WeeklyTotals};
pub use news::{NewsService, ScrapedPage};
pub use prices::{PriceClient, PriceService, PriceSummary};
pub use strava::{StravaActivitySummary, StravaClient, StravaService};
pub use weather::{WeatherClient, WeatherReport, WeatherService};
