// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grand Exchange prices: latest price, 6-hour history and percentage changes.

use crate::error::AppError;
use crate::models::price::{LatestResponse, TimeseriesResponse};
use crate::models::PricePoint;
use crate::services::catalog::{ItemCatalog, ItemRef};
use serde::Deserialize;
use std::sync::Arc;

/// User-Agent required by the OSRS Wiki prices API.
const USER_AGENT: &str = "RuneSync Price Tracker";

/// Buckets spanning 24 hours (4 × 6h).
pub const LOOKBACK_24H: usize = 4;

/// Buckets spanning 7 days (28 × 6h).
pub const LOOKBACK_7D: usize = 28;

/// Price API client.
#[derive(Clone)]
pub struct PriceClient {
    http: reqwest::Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Latest traded price (high, falling back to low). `None` if the item
    /// has no recent trades.
    pub async fn latest(&self, item_id: u32) -> Result<Option<i64>, AppError> {
        let url = format!("{}/latest", self.base_url);
        let response: LatestResponse = self
            .get_json(&url, &[("id", item_id.to_string())])
            .await?;

        Ok(response
            .data
            .get(&item_id.to_string())
            .and_then(|p| p.price()))
    }

    /// 6-hour price buckets, oldest first.
    pub async fn timeseries(&self, item_id: u32) -> Result<Vec<PricePoint>, AppError> {
        let url = format!("{}/timeseries", self.base_url);
        let response: TimeseriesResponse = self
            .get_json(
                &url,
                &[("timestep", "6h".to_string()), ("id", item_id.to_string())],
            )
            .await?;
        Ok(response.data)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::transport("prices", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::status("prices", status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::transport("prices", format!("JSON parse error: {}", e)))
    }
}

/// Everything the price pane shows for the tracked item.
///
/// Each field fails independently; `None` means the value is unavailable.
#[derive(Debug, Clone, Default)]
pub struct PriceSummary {
    pub current: Option<String>,
    pub change_24h: Option<String>,
    pub change_7d: Option<String>,
    /// Raw history for the chart (empty if the series could not be fetched)
    pub history: Vec<PricePoint>,
}

/// High-level price service resolving names through the catalog.
#[derive(Clone)]
pub struct PriceService {
    client: PriceClient,
    catalog: Arc<ItemCatalog>,
}

impl PriceService {
    pub fn new(client: PriceClient, catalog: Arc<ItemCatalog>) -> Self {
        Self { client, catalog }
    }

    fn resolve(&self, item: &ItemRef) -> Result<u32, AppError> {
        self.catalog
            .resolve_ref(item)
            .ok_or_else(|| AppError::Resolve(format!("{:?}", item)))
    }

    /// Current raw price. `Ok(None)` means the item has no recent trades.
    pub async fn current_price(&self, item: &ItemRef) -> Result<Option<i64>, AppError> {
        let id = self.resolve(item)?;
        self.client.latest(id).await
    }

    /// Current price formatted with K/M suffixes.
    pub async fn current_price_formatted(&self, item: &ItemRef) -> Result<Option<String>, AppError> {
        Ok(self.current_price(item).await?.map(format_price))
    }

    /// 24-hour change, e.g. "+1.3%". `Ok(None)` when history is too short.
    pub async fn change_24h(&self, item: &ItemRef) -> Result<Option<String>, AppError> {
        self.change_over(item, LOOKBACK_24H).await
    }

    /// 7-day change, e.g. "-4.0%". `Ok(None)` when history is too short.
    pub async fn change_7d(&self, item: &ItemRef) -> Result<Option<String>, AppError> {
        self.change_over(item, LOOKBACK_7D).await
    }

    async fn change_over(
        &self,
        item: &ItemRef,
        lookback: usize,
    ) -> Result<Option<String>, AppError> {
        let id = self.resolve(item)?;
        let history = self.client.timeseries(id).await?;
        if history.len() < lookback {
            return Ok(None);
        }
        let Some(current) = self.client.latest(id).await? else {
            return Ok(None);
        };
        Ok(percent_change(current, &history, lookback).map(format_change))
    }

    /// Fetch the latest price and history once and derive every pane value.
    ///
    /// Never fails as a whole: each failure is logged and leaves its field empty.
    pub async fn summary(&self, item: &ItemRef) -> PriceSummary {
        let id = match self.resolve(item) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Tracked item not resolved, price pane left blank");
                return PriceSummary::default();
            }
        };

        let (latest, history) = tokio::join!(self.client.latest(id), self.client.timeseries(id));

        let current = latest.unwrap_or_else(|e| {
            tracing::warn!(item_id = id, error = %e, "Failed to fetch latest price");
            None
        });
        let history = history.unwrap_or_else(|e| {
            tracing::warn!(item_id = id, error = %e, "Failed to fetch price history");
            Vec::new()
        });

        let change = |lookback| {
            current
                .and_then(|c| percent_change(c, &history, lookback))
                .map(format_change)
        };

        PriceSummary {
            current: current.map(format_price),
            change_24h: change(LOOKBACK_24H),
            change_7d: change(LOOKBACK_7D),
            history,
        }
    }
}

/// Format a price with RuneScape-style suffixes.
///
/// - `>= 1,000,000`: millions with one decimal ("39.4M")
/// - `>= 1,000`: thousands with no decimals ("450K")
/// - otherwise the plain integer
///
/// Rounding is `{:.N}` formatting: round-half-to-even on the exact binary
/// value, so 4,500 gives "4K" and 999,999 gives "1000K".
pub fn format_price(price: i64) -> String {
    if price >= 1_000_000 {
        format!("{:.1}M", price as f64 / 1_000_000.0)
    } else if price >= 1_000 {
        format!("{:.0}K", price as f64 / 1_000.0)
    } else {
        price.to_string()
    }
}

/// Percentage change from the bucket `lookback` positions from the end.
///
/// `None` if the history is shorter than `lookback` or the reference price is
/// missing or non-positive.
pub fn percent_change(current: i64, history: &[PricePoint], lookback: usize) -> Option<f64> {
    if lookback == 0 || history.len() < lookback {
        return None;
    }
    let reference = history[history.len() - lookback].price()?;
    if reference <= 0 {
        return None;
    }
    Some((current - reference) as f64 / reference as f64 * 100.0)
}

/// Format a percentage change with an explicit sign for non-negative values.
pub fn format_change(change_pct: f64) -> String {
    if change_pct >= 0.0 {
        format!("+{:.1}%", change_pct)
    } else {
        format!("{:.1}%", change_pct)
    }
}
