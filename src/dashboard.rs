// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One dashboard render: refresh the token, gather every pane concurrently,
//! composite and save.

use crate::error::AppError;
use crate::models::{NewsArticle, Units};
use crate::render::text::proper_title;
use crate::render::{render_price_chart, RenderError, DEFAULT_CHART_SIZE};
use crate::services::weather::WeatherReport;
use crate::services::{ItemRef, WeeklyTotals};
use crate::time_utils::{days_since_week_start, format_long_date, week_start};
use crate::AppState;
use chrono::{DateTime, Duration, Local, NaiveDate};
use image::{RgbImage, RgbaImage};
use std::path::Path;

/// Everything the compositor draws.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub price: PricePane,
    pub news: NewsArticle,
    pub fitness: FitnessPane,
    pub weather: WeatherPane,
    /// "HH:MM"
    pub clock: String,
    /// "Sunday 18th October"
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct PricePane {
    /// Title-cased tracked item
    pub title: String,
    pub current: Option<String>,
    pub change_24h: Option<String>,
    pub change_7d: Option<String>,
    pub chart: Option<RgbaImage>,
}

#[derive(Debug, Clone, Default)]
pub struct FitnessPane {
    pub running: String,
    pub strength: String,
    pub running_progress: f64,
    pub strength_progress: f64,
}

#[derive(Debug, Clone)]
pub struct WeatherPane {
    /// "Weather in {City}:"
    pub title: String,
    pub report: WeatherReport,
    pub units: Units,
}

/// Gather every value for a render at `now`.
///
/// Only the token refresh is fatal. After it, the panes are fetched
/// concurrently and each one degrades on its own.
pub async fn gather(state: &AppState, now: DateTime<Local>) -> Result<DashboardData, AppError> {
    let token = state
        .strava
        .get_valid_access_token(now.timestamp())
        .await
        .inspect_err(|e| {
            if e.is_strava_token_error() {
                tracing::error!("Strava rejected the refresh token; re-authorize the app");
            }
        })?;

    let (fitness, price, weather, news) = tokio::join!(
        fitness_pane(state, &token, now),
        price_pane(state),
        weather_pane(state, now.date_naive()),
        state.news.article(),
    );

    Ok(DashboardData {
        price,
        news,
        fitness,
        weather,
        clock: now.format("%H:%M").to_string(),
        date: format_long_date(&now),
    })
}

async fn fitness_pane(state: &AppState, token: &str, now: DateTime<Local>) -> FitnessPane {
    let local = now.naive_local();
    let boundary = week_start(local);
    let after = (now - Duration::days(days_since_week_start(local))).timestamp();

    // One fetch covers both metrics
    let activities = state.strava.recent_activities(token, after).await;
    let totals = WeeklyTotals::from_activities(&activities, boundary);
    let targets = &state.preferences.fitness_targets;

    tracing::info!(
        running_km = totals.running_km,
        strength_hours = totals.strength_hours,
        activities = activities.len(),
        "Weekly fitness totals"
    );

    FitnessPane {
        running: totals.running_display(),
        strength: totals.strength_display(),
        running_progress: totals.running_progress(targets.running_km_per_week),
        strength_progress: totals.strength_progress(targets.weight_training_hours_per_week),
    }
}

async fn price_pane(state: &AppState) -> PricePane {
    let tracked = &state.preferences.tracked_item;
    let summary = state.prices.summary(&ItemRef::parse(tracked)).await;

    let (width, height) = DEFAULT_CHART_SIZE;
    let chart = match render_price_chart(&summary.history, width, height) {
        Ok(chart) => Some(chart),
        Err(e @ (RenderError::InsufficientHistory(_) | RenderError::InsufficientData(_))) => {
            tracing::info!(item = %tracked, reason = %e, "No price chart");
            None
        }
        Err(e) => {
            tracing::warn!(item = %tracked, error = %e, "Chart rendering failed");
            None
        }
    };

    PricePane {
        title: proper_title(tracked),
        current: summary.current,
        change_24h: summary.change_24h,
        change_7d: summary.change_7d,
        chart,
    }
}

async fn weather_pane(state: &AppState, today: NaiveDate) -> WeatherPane {
    let city = &state.preferences.weather.chosen_city;
    WeatherPane {
        title: format!("Weather in {}:", proper_title(city)),
        report: state.weather.report(city, today).await,
        units: state.weather.units(),
    }
}

/// Gather and composite the dashboard for the current local time.
pub async fn render(state: &AppState) -> Result<RgbImage, AppError> {
    let data = gather(state, Local::now()).await?;
    Ok(state.compositor.compose(&data)?)
}

/// Write the composed dashboard as a PNG.
pub fn save(image: &RgbImage, path: &Path) -> Result<(), AppError> {
    image.save(path).map_err(RenderError::from)?;
    Ok(())
}
