// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard rendering: price chart, fonts, layout and the final composite.

pub mod chart;
pub mod compositor;
pub mod fonts;
pub mod layout;
pub mod text;

pub use chart::{render_price_chart, DEFAULT_CHART_SIZE};
pub use compositor::Compositor;
pub use fonts::FontSet;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Price history too short to chart ({0} buckets)")]
    InsufficientHistory(usize),

    #[error("Not enough price data to chart ({0} valid points)")]
    InsufficientData(usize),

    #[error("Chart drawing failed: {0}")]
    Chart(String),

    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Chart rasterization failed: {0}")]
    Rasterize(String),

    #[error("Failed to load {path}: {message}")]
    Asset { path: String, message: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl From<RenderError> for crate::error::AppError {
    fn from(err: RenderError) -> Self {
        crate::error::AppError::Render(err.to_string())
    }
}
