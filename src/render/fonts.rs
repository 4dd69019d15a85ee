// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RuneScape fonts for dashboard text.

use super::RenderError;
use plotters::style::{register_font, FontDesc, FontFamily, FontStyle};
use std::path::Path;

const BOLD: &str = "runescape-bold";
const PLAIN: &str = "runescape-plain";
const QUILL: &str = "runescape-quill";

/// (family name, file in the resources directory)
pub(crate) const FONT_FILES: [(&str, &str); 3] = [
    (BOLD, "RuneScape-Bold-12.ttf"),
    (PLAIN, "RuneScape-Plain-12.ttf"),
    (QUILL, "RuneScape-Quill.ttf"),
];

/// Handle proving the dashboard fonts are registered with plotters.
///
/// The font registry is process-global, so this is created once at startup.
#[derive(Debug, Clone, Copy)]
pub struct FontSet {
    _registered: (),
}

impl FontSet {
    /// Read the font files from `resources_dir` and register them.
    pub fn load(resources_dir: &Path) -> Result<Self, RenderError> {
        for (family, file) in FONT_FILES {
            let path = resources_dir.join(file);
            let bytes = std::fs::read(&path).map_err(|e| RenderError::Asset {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            // plotters keeps a reference for the lifetime of the process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            // InvalidFont carries no detail to report
            register_font(family, FontStyle::Normal, bytes).map_err(|_| RenderError::Asset {
                path: path.display().to_string(),
                message: "invalid font data".to_string(),
            })?;

            tracing::debug!(family, path = %path.display(), "Registered font");
        }

        Ok(Self { _registered: () })
    }

    fn font(&self, family: &'static str, size: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::Name(family), size, FontStyle::Normal)
    }

    /// Item name, metrics, news title and stat labels.
    pub fn text(&self) -> FontDesc<'static> {
        self.font(BOLD, 16.0)
    }

    /// "Current:", "24h:", "7d:"
    pub fn price_label(&self) -> FontDesc<'static> {
        self.font(BOLD, 16.0)
    }

    /// Wrapped news summary.
    pub fn news_abstract(&self) -> FontDesc<'static> {
        self.font(PLAIN, 15.0)
    }

    /// Weather values.
    pub fn weather(&self) -> FontDesc<'static> {
        self.font(PLAIN, 16.0)
    }

    /// Date line above the clock.
    pub fn time_subtitle(&self) -> FontDesc<'static> {
        self.font(QUILL, 32.0)
    }

    /// Large clock.
    pub fn time_title(&self) -> FontDesc<'static> {
        self.font(QUILL, 96.0)
    }

    /// Rendered width of `text` in pixels (0 if it cannot be measured).
    pub fn measure(font: &FontDesc<'_>, text: &str) -> u32 {
        font.box_size(text).map(|(w, _)| w).unwrap_or(0)
    }
}
