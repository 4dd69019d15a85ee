// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Latest game news extracted from the OSRS home page.

use image::RgbaImage;

/// Headline, summary and thumbnail for the news pane.
///
/// Title and summary always hold displayable text (a fallback message when
/// scraping failed); the image is simply absent.
#[derive(Debug, Clone)]
pub struct NewsArticle {
    pub title: String,
    pub summary: String,
    pub image: Option<RgbaImage>,
}
