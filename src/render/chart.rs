// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Compact 7-day price sparkline in the stone-tile style of the game UI.
//!
//! The chart is drawn to an SVG string with plotters, then rasterized with
//! resvg. Each call builds its own drawing context, so rendering is a pure
//! function of the input series.

use super::RenderError;
use crate::models::PricePoint;
use crate::time_utils::{local_from_unix, local_midnight};
use chrono::Duration;
use image::RgbaImage;
use plotters::prelude::*;
use resvg::{tiny_skia, usvg};

/// Buckets plotted: 7 days of 6-hour buckets.
pub const CHART_BUCKETS: usize = 28;

/// Size of the chart slot in the price pane.
pub const DEFAULT_CHART_SIZE: (u32, u32) = (143, 110);

const TILE_FILL: RGBColor = RGBColor(0x5D, 0x4E, 0x37);
const TILE_BORDER: RGBColor = RGBColor(0x8B, 0x73, 0x55);
const GRID: RGBColor = RGBColor(0x6B, 0x5B, 0x47);

/// Plot-area insets as fractions of (left, right, top, bottom).
const INSETS: (f64, f64, f64, f64) = (0.12, 0.04, 0.04, 0.12);

/// Trailing buckets with a positive price, as `(timestamp, price)`.
pub fn chart_points(history: &[PricePoint]) -> Vec<(i64, f64)> {
    let start = history.len().saturating_sub(CHART_BUCKETS);
    history[start..]
        .iter()
        .filter_map(|p| {
            p.price()
                .filter(|&price| price > 0)
                .map(|price| (p.timestamp, price as f64))
        })
        .collect()
}

/// Render the trailing [`CHART_BUCKETS`] of `history` as an RGBA image of
/// exactly `width` x `height` pixels.
///
/// Needs a full week of buckets and at least two with a price.
pub fn render_price_chart(
    history: &[PricePoint],
    width: u32,
    height: u32,
) -> Result<RgbaImage, RenderError> {
    if history.len() < CHART_BUCKETS {
        return Err(RenderError::InsufficientHistory(history.len()));
    }

    let points = chart_points(history);
    if points.len() < 2 {
        return Err(RenderError::InsufficientData(points.len()));
    }

    let svg = draw_svg(&points, width, height)?;
    rasterize(&svg, width, height)
}

fn chart_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Chart(e.to_string())
}

/// Local midnights from the first point's date through 7 days later that
/// fall inside `[start, end]`.
fn day_boundaries(start: i64, end: i64) -> Vec<i64> {
    let Some(first_day) = local_from_unix(start).map(|dt| dt.date_naive()) else {
        return Vec::new();
    };

    (0..=7)
        .filter_map(|offset| local_midnight(first_day + Duration::days(offset)))
        .map(|midnight| midnight.timestamp())
        .filter(|ts| (start..=end).contains(ts))
        .collect()
}

fn draw_svg(points: &[(i64, f64)], width: u32, height: u32) -> Result<String, RenderError> {
    let x_start = points[0].0;
    let x_end = points[points.len() - 1].0.max(x_start + 1);

    let min_price = points.iter().map(|&(_, p)| p).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|&(_, p)| p).fold(f64::NEG_INFINITY, f64::max);
    let mid_price = (min_price + max_price) / 2.0;
    let pad = if max_price > min_price {
        (max_price - min_price) * 0.05
    } else {
        (min_price.abs() * 0.05).max(1.0)
    };

    let (left, right, top, bottom) = INSETS;
    let w = width as f64;
    let h = height as f64;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        let area = root.margin(
            (h * top) as u32,
            (h * bottom) as u32,
            (w * left) as u32,
            (w * right) as u32,
        );

        let mut chart = ChartBuilder::on(&area)
            .build_cartesian_2d(x_start..x_end, (min_price - pad)..(max_price + pad))
            .map_err(chart_err)?;

        chart
            .plotting_area()
            .fill(&TILE_FILL.mix(0.4))
            .map_err(chart_err)?;

        let grid = GRID.mix(0.3).stroke_width(1);
        for y in [min_price, mid_price, max_price] {
            chart
                .draw_series(LineSeries::new([(x_start, y), (x_end, y)], grid))
                .map_err(chart_err)?;
        }
        for x in day_boundaries(x_start, x_end) {
            chart
                .draw_series(LineSeries::new(
                    [(x, min_price - pad), (x, max_price + pad)],
                    grid,
                ))
                .map_err(chart_err)?;
        }

        chart
            .draw_series(
                LineSeries::new(points.iter().copied(), YELLOW.stroke_width(2)).point_size(2),
            )
            .map_err(chart_err)?;

        let (area_w, area_h) = area.dim_in_pixel();
        area.draw(&Rectangle::new(
            [(0, 0), (area_w as i32 - 1, area_h as i32 - 1)],
            TILE_BORDER.stroke_width(2),
        ))
        .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    Ok(svg)
}

fn rasterize(svg: &str, width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|e| RenderError::Rasterize(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| RenderError::Rasterize(format!("invalid size {}x{}", width, height)))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::Rasterize(e.to_string()))?;
    Ok(image::load_from_memory(&png)?.to_rgba8())
}
