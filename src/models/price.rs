// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grand Exchange price payloads from the OSRS Wiki real-time prices API.

use serde::Deserialize;
use std::collections::HashMap;

/// Response of `GET /latest?id={id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestResponse {
    #[serde(default)]
    pub data: HashMap<String, LatestPrice>,
}

/// Most recent instant-buy / instant-sell prices for an item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestPrice {
    pub high: Option<i64>,
    pub low: Option<i64>,
}

impl LatestPrice {
    /// High price, falling back to low. Zero means no trade.
    pub fn price(&self) -> Option<i64> {
        prefer_nonzero(self.high, self.low)
    }
}

/// Response of `GET /timeseries?timestep=6h&id={id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeseriesResponse {
    #[serde(default)]
    pub data: Vec<PricePoint>,
}

/// One 6-hour bucket.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    /// Bucket start (Unix seconds)
    #[serde(default)]
    pub timestamp: i64,
    pub avg_high_price: Option<i64>,
    pub avg_low_price: Option<i64>,
}

impl PricePoint {
    /// Average high price, falling back to the average low price.
    pub fn price(&self) -> Option<i64> {
        prefer_nonzero(self.avg_high_price, self.avg_low_price)
    }
}

fn prefer_nonzero(primary: Option<i64>, fallback: Option<i64>) -> Option<i64> {
    primary
        .filter(|p| *p != 0)
        .or(fallback)
        .filter(|p| *p != 0)
}
