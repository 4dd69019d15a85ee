// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Draws gathered dashboard values onto the background image.

use super::fonts::FontSet;
use super::layout::{
    bar_fill_width, Field, ABSTRACT_LINE_HEIGHT, ABSTRACT_MAX_WIDTH, AGILITY_BAR, BAR_BACKGROUND,
    BAR_FILL, BAR_HEIGHT, BAR_WIDTH, STRENGTH_BAR,
};
use super::text::{centered_x, wrap_text};
use super::RenderError;
use crate::dashboard::{DashboardData, FitnessPane, PricePane, WeatherPane};
use crate::models::NewsArticle;
use image::{imageops, DynamicImage, RgbImage, RgbaImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// Background image file in the resources directory.
pub const BACKGROUND_FILE: &str = "background.png";

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Dashboard compositor: background plus fonts.
pub struct Compositor {
    background: RgbaImage,
    fonts: FontSet,
}

impl Compositor {
    pub fn new(background: RgbaImage, fonts: FontSet) -> Self {
        Self { background, fonts }
    }

    /// Load the background and register the fonts from the resources directory.
    pub fn load(resources_dir: &Path) -> Result<Self, RenderError> {
        let path = resources_dir.join(BACKGROUND_FILE);
        let background = image::open(&path)
            .map_err(|e| RenderError::Asset {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
            .to_rgba8();
        tracing::debug!(
            width = background.width(),
            height = background.height(),
            "Loaded dashboard background"
        );

        let fonts = FontSet::load(resources_dir)?;
        Ok(Self::new(background, fonts))
    }

    /// Compose a fresh canvas. The background is never modified.
    ///
    /// Images are overlaid with alpha, then the canvas is flattened to RGB
    /// for text drawing. The result carries no alpha channel even if the
    /// background has one.
    pub fn compose(&self, data: &DashboardData) -> Result<RgbImage, RenderError> {
        let mut canvas = self.background.clone();
        overlay_images(&mut canvas, &data.price, &data.news);

        let mut canvas = DynamicImage::ImageRgba8(canvas).to_rgb8();
        let size = canvas.dimensions();
        {
            let root = BitMapBackend::with_buffer(&mut canvas, size).into_drawing_area();

            self.draw_price_pane(&root, &data.price)?;
            self.draw_news_pane(&root, &data.news)?;
            self.draw_stats_pane(&root, &data.fitness)?;
            self.draw_weather_pane(&root, &data.weather)?;
            self.draw_clock(&root, &data.clock, &data.date)?;
            draw_progress_bars(&root, &data.fitness)?;

            root.present().map_err(draw_err)?;
        }
        Ok(canvas)
    }

    fn draw_price_pane(&self, root: &Area<'_>, price: &PricePane) -> Result<(), RenderError> {
        let text = self.fonts.text();
        let label = self.fonts.price_label();

        draw_shadowed(root, &price.title, &text, &YELLOW, Field::PriceName, 1)?;

        let rows = [
            (Field::PriceCurrent, "Current:", Field::PriceCurrentMetric, &price.current),
            (Field::Price24h, "24h:", Field::Price24hMetric, &price.change_24h),
            (Field::Price7d, "7d:", Field::Price7dMetric, &price.change_7d),
        ];
        for (label_field, label_text, value_field, value) in rows {
            draw_shadowed(root, label_text, &label, &WHITE, label_field, 1)?;
            if let Some(value) = value {
                draw_shadowed(root, value, &text, &YELLOW, value_field, 1)?;
            }
        }
        Ok(())
    }

    fn draw_news_pane(&self, root: &Area<'_>, news: &NewsArticle) -> Result<(), RenderError> {
        draw_shadowed(root, &news.title, &self.fonts.text(), &YELLOW, Field::NewsTitle, 1)?;

        let font = self.fonts.news_abstract();
        let lines = wrap_text(&news.summary, ABSTRACT_MAX_WIDTH, |line| {
            FontSet::measure(&font, line)
        });
        let (x, y) = Field::NewsAbstract.position();
        for (i, line) in lines.iter().enumerate() {
            let pos = (x, y + i as i32 * ABSTRACT_LINE_HEIGHT);
            draw_shadowed_at(root, line, &font, &WHITE, pos, 1)?;
        }
        Ok(())
    }

    fn draw_stats_pane(&self, root: &Area<'_>, fitness: &FitnessPane) -> Result<(), RenderError> {
        let text = self.fonts.text();
        draw_shadowed(root, "Agility:", &text, &WHITE, Field::AgilityTitle, 1)?;
        draw_shadowed(root, &fitness.running, &text, &YELLOW, Field::AgilityMetric, 1)?;
        draw_shadowed(root, "Strength:", &text, &WHITE, Field::StrengthTitle, 1)?;
        draw_shadowed(root, &fitness.strength, &text, &YELLOW, Field::StrengthMetric, 1)?;
        Ok(())
    }

    fn draw_weather_pane(&self, root: &Area<'_>, weather: &WeatherPane) -> Result<(), RenderError> {
        draw_shadowed(root, &weather.title, &self.fonts.text(), &YELLOW, Field::WeatherTitle, 1)?;

        let font = self.fonts.weather();
        let report = &weather.report;
        let temperature = report
            .daily_high
            .as_ref()
            .map(|high| format!("{} {}", high, weather.units.temperature_suffix()));

        let values = [
            (Field::WeatherTemperature, temperature.as_deref()),
            (Field::WeatherWind, report.wind.as_deref()),
            (Field::WeatherRain, Some(report.rain_chance.as_str())),
            (Field::WeatherCondition, report.condition.as_deref()),
            (Field::WeatherSunset, report.sunset.as_deref()),
            (Field::WeatherSunrise, report.sunrise.as_deref()),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                draw_shadowed(root, value, &font, &WHITE, field, 1)?;
            }
        }
        Ok(())
    }

    fn draw_clock(&self, root: &Area<'_>, clock: &str, date: &str) -> Result<(), RenderError> {
        for (text, font, field) in [
            (clock, self.fonts.time_title(), Field::Time),
            (date, self.fonts.time_subtitle(), Field::Date),
        ] {
            let (center, y) = field.position();
            let x = centered_x(center, FontSet::measure(&font, text));
            draw_shadowed_at(root, text, &font, &YELLOW, (x, y), 2)?;
        }
        Ok(())
    }
}

/// Alpha-composite the chart and the news thumbnail.
fn overlay_images(canvas: &mut RgbaImage, price: &PricePane, news: &NewsArticle) {
    let images = [
        (Field::PriceChart, price.chart.as_ref()),
        (Field::NewsImage, news.image.as_ref()),
    ];
    for (field, image) in images {
        if let Some(image) = image {
            let (x, y) = field.position();
            imageops::overlay(canvas, image, x as i64, y as i64);
        }
    }
}

fn draw_progress_bars(root: &Area<'_>, fitness: &FitnessPane) -> Result<(), RenderError> {
    for ((x, y), percentage) in [
        (AGILITY_BAR, fitness.running_progress),
        (STRENGTH_BAR, fitness.strength_progress),
    ] {
        root.draw(&Rectangle::new(
            [(x, y), (x + BAR_WIDTH, y + BAR_HEIGHT)],
            BAR_BACKGROUND.filled(),
        ))
        .map_err(draw_err)?;

        let fill = bar_fill_width(percentage);
        if fill > 0 {
            root.draw(&Rectangle::new(
                [(x, y), (x + fill, y + BAR_HEIGHT)],
                BAR_FILL.filled(),
            ))
            .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_shadowed(
    root: &Area<'_>,
    text: &str,
    font: &FontDesc<'_>,
    color: &RGBColor,
    field: Field,
    shadow_offset: i32,
) -> Result<(), RenderError> {
    draw_shadowed_at(root, text, font, color, field.position(), shadow_offset)
}

/// Black shadow first, then the colored text on top.
fn draw_shadowed_at(
    root: &Area<'_>,
    text: &str,
    font: &FontDesc<'_>,
    color: &RGBColor,
    (x, y): (i32, i32),
    shadow_offset: i32,
) -> Result<(), RenderError> {
    if text.is_empty() {
        return Ok(());
    }
    root.draw_text(text, &font.color(&BLACK), (x + shadow_offset, y + shadow_offset))
        .map_err(draw_err)?;
    root.draw_text(text, &font.color(color), (x, y))
        .map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Units;
    use crate::render::fonts::tests::fixture_fonts;
    use crate::services::weather::WeatherReport;
    use image::{Rgb, Rgba};

    const GRAY: [u8; 3] = [40, 40, 40];

    /// (x0, y0, x1, y1), end exclusive
    type Region = (u32, u32, u32, u32);

    fn background() -> (RgbaImage, RgbImage) {
        (
            RgbaImage::from_pixel(800, 480, Rgba([GRAY[0], GRAY[1], GRAY[2], 255])),
            RgbImage::from_pixel(800, 480, Rgb(GRAY)),
        )
    }

    fn empty_data() -> DashboardData {
        DashboardData {
            price: PricePane::default(),
            news: NewsArticle {
                title: String::new(),
                summary: String::new(),
                image: None,
            },
            fitness: FitnessPane::default(),
            weather: WeatherPane {
                title: String::new(),
                report: WeatherReport::default(),
                units: Units::Metric,
            },
            clock: String::new(),
            date: String::new(),
        }
    }

    /// The background with only `items` drawn on it, in one color.
    fn draw_alone(
        bg: &RgbImage,
        items: &[(&str, (i32, i32))],
        font: &FontDesc<'_>,
        color: &RGBColor,
    ) -> RgbImage {
        let mut canvas = bg.clone();
        let size = canvas.dimensions();
        {
            let root = BitMapBackend::with_buffer(&mut canvas, size).into_drawing_area();
            for (text, pos) in items {
                root.draw_text(text, &font.color(color), *pos).unwrap();
            }
            root.present().unwrap();
        }
        canvas
    }

    /// Within `region`, pixels touched only by the text match the colored
    /// text and pixels touched only by the shadow match black text moved by
    /// `offset`. Untouched pixels keep the background.
    fn assert_shadowed(
        actual: &RgbImage,
        bg: &RgbImage,
        items: &[(&str, (i32, i32))],
        font: &FontDesc<'_>,
        color: &RGBColor,
        offset: i32,
        (x0, y0, x1, y1): Region,
    ) {
        let text = draw_alone(bg, items, font, color);
        let shifted: Vec<(&str, (i32, i32))> = items
            .iter()
            .map(|(t, (x, y))| (*t, (x + offset, y + offset)))
            .collect();
        let shadow = draw_alone(bg, &shifted, font, &BLACK);

        let (mut text_only, mut shadow_only) = (0, 0);
        for y in y0..y1 {
            for x in x0..x1 {
                let b = bg.get_pixel(x, y);
                let t = text.get_pixel(x, y);
                let s = shadow.get_pixel(x, y);
                let a = actual.get_pixel(x, y);
                if t == b && s == b {
                    assert_eq!(a, b, "background changed at ({}, {})", x, y);
                } else if t == b {
                    assert_eq!(a, s, "shadow mismatch at ({}, {})", x, y);
                    shadow_only += 1;
                } else if s == b {
                    assert_eq!(a, t, "text mismatch at ({}, {})", x, y);
                    text_only += 1;
                }
            }
        }
        assert!(text_only > 0, "no text pixels in region");
        assert!(shadow_only > 0, "no shadow pixels in region");
    }

    /// Pixels in `region` that differ from the background.
    fn ink(actual: &RgbImage, (x0, y0, x1, y1): Region) -> usize {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| actual.get_pixel(x, y).0 != GRAY)
            .count()
    }

    fn fitness(running: f64, strength: f64) -> FitnessPane {
        FitnessPane {
            running: String::new(),
            strength: String::new(),
            running_progress: running,
            strength_progress: strength,
        }
    }

    fn pixel(canvas: &RgbImage, (x, y): (i32, i32)) -> [u8; 3] {
        canvas.get_pixel(x as u32, y as u32).0
    }

    #[test]
    fn test_progress_bars_fill_proportionally() {
        let mut canvas = RgbImage::from_pixel(800, 480, image::Rgb([200, 200, 200]));
        {
            let root = BitMapBackend::with_buffer(&mut canvas, (800, 480)).into_drawing_area();
            draw_progress_bars(&root, &fitness(50.0, 0.0)).unwrap();
            root.present().unwrap();
        }

        let (ax, ay) = AGILITY_BAR;
        assert_eq!(pixel(&canvas, (ax + 10, ay + 5)), [153, 71, 4]);
        assert_eq!(pixel(&canvas, (ax + 200, ay + 5)), [0, 0, 0]);

        let (sx, sy) = STRENGTH_BAR;
        assert_eq!(pixel(&canvas, (sx + 10, sy + 5)), [0, 0, 0]);

        // Outside the bars the canvas is untouched
        assert_eq!(pixel(&canvas, (ax - 5, ay + 5)), [200, 200, 200]);
    }

    #[test]
    fn test_overlay_places_images_at_their_slots() {
        let mut canvas = RgbaImage::from_pixel(800, 480, Rgba([0, 0, 0, 255]));
        let price = PricePane {
            chart: Some(RgbaImage::from_pixel(10, 10, Rgba([255, 255, 0, 255]))),
            ..Default::default()
        };
        let news = NewsArticle {
            title: String::new(),
            summary: String::new(),
            image: Some(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]))),
        };

        overlay_images(&mut canvas, &price, &news);

        let (cx, cy) = Field::PriceChart.position();
        assert_eq!(canvas.get_pixel(cx as u32 + 1, cy as u32 + 1).0, [255, 255, 0, 255]);
        let (nx, ny) = Field::NewsImage.position();
        assert_eq!(canvas.get_pixel(nx as u32 + 1, ny as u32 + 1).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_chart_pixels_keep_background() {
        let mut canvas = RgbaImage::from_pixel(800, 480, Rgba([10, 20, 30, 255]));
        let price = PricePane {
            chart: Some(RgbaImage::from_pixel(10, 10, Rgba([255, 255, 0, 0]))),
            ..Default::default()
        };
        let news = NewsArticle {
            title: String::new(),
            summary: String::new(),
            image: None,
        };

        overlay_images(&mut canvas, &price, &news);

        let (cx, cy) = Field::PriceChart.position();
        assert_eq!(canvas.get_pixel(cx as u32, cy as u32).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_compose_title_has_one_pixel_shadow() {
        let fonts = fixture_fonts();
        let (rgba, bg) = background();
        let compositor = Compositor::new(rgba, fonts);

        let mut data = empty_data();
        data.price.title = "Abyssal whip".to_string();
        let canvas = compositor.compose(&data).unwrap();

        let font = fonts.text();
        let (x, y) = Field::PriceName.position();
        let width = FontSet::measure(&font, "Abyssal whip");
        assert_shadowed(
            &canvas,
            &bg,
            &[("Abyssal whip", (x, y))],
            &font,
            &YELLOW,
            1,
            (x as u32 - 4, y as u32 - 4, x as u32 + width + 6, y as u32 + 23),
        );

        // Text pixels are blends of yellow over the background
        let (px, py) = (x as u32..x as u32 + width, y as u32..y as u32 + 18);
        let yellowish = py
            .flat_map(|y| px.clone().map(move |x| (x, y)))
            .map(|(x, y)| canvas.get_pixel(x, y).0)
            .any(|[r, g, b]| r == g && r > GRAY[0] && b <= GRAY[2]);
        assert!(yellowish);
    }

    #[test]
    fn test_compose_centers_clock_with_two_pixel_shadow() {
        let fonts = fixture_fonts();
        let (rgba, bg) = background();
        let compositor = Compositor::new(rgba, fonts);

        let mut data = empty_data();
        data.clock = "12:34".to_string();
        let canvas = compositor.compose(&data).unwrap();

        let font = fonts.time_title();
        let (center, y) = Field::Time.position();
        let x = centered_x(center, FontSet::measure(&font, "12:34"));
        assert_shadowed(&canvas, &bg, &[("12:34", (x, y))], &font, &YELLOW, 2, (380, 50, 800, 183));

        let mut data = empty_data();
        data.date = "Sunday 18th October".to_string();
        let canvas = compositor.compose(&data).unwrap();

        let font = fonts.time_subtitle();
        let (center, y) = Field::Date.position();
        let x = centered_x(center, FontSet::measure(&font, "Sunday 18th October"));
        assert_shadowed(
            &canvas,
            &bg,
            &[("Sunday 18th October", (x, y))],
            &font,
            &YELLOW,
            2,
            (380, 30, 800, 183),
        );
    }

    #[test]
    fn test_compose_stacks_abstract_lines() {
        let fonts = fixture_fonts();
        let (rgba, bg) = background();
        let compositor = Compositor::new(rgba, fonts);

        let summary = "Leagues return next week with new relics and a fresh set of tasks in every region";
        let mut data = empty_data();
        data.news.summary = summary.to_string();
        let canvas = compositor.compose(&data).unwrap();

        let font = fonts.news_abstract();
        let lines = wrap_text(summary, ABSTRACT_MAX_WIDTH, |line| FontSet::measure(&font, line));
        assert!(lines.len() >= 2);

        let (x, y) = Field::NewsAbstract.position();
        let items: Vec<(&str, (i32, i32))> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.as_str(), (x, y + i as i32 * 15)))
            .collect();
        let bottom = y as u32 + lines.len() as u32 * 15 + 8;
        assert_shadowed(&canvas, &bg, &items, &font, &WHITE, 1, (430, 200, 619, bottom));
    }

    #[test]
    fn test_compose_omits_missing_values() {
        let fonts = fixture_fonts();
        let (rgba, _) = background();
        let compositor = Compositor::new(rgba, fonts);

        let label_end = Field::PriceCurrent.position().0 as u32
            + FontSet::measure(&fonts.price_label(), "Current:")
            + 3;
        let (mx, my) = Field::PriceCurrentMetric.position();
        let price_slot = (label_end.max(mx as u32), my as u32, 199, my as u32 + 16);
        let (tx, ty) = Field::WeatherTemperature.position();
        let temperature_slot = (tx as u32, ty as u32, 575, ty as u32 + 20);

        let canvas = compositor.compose(&empty_data()).unwrap();
        assert_eq!(ink(&canvas, price_slot), 0);
        assert_eq!(ink(&canvas, temperature_slot), 0);

        let mut data = empty_data();
        data.price.current = Some("2K".to_string());
        data.weather.report.daily_high = Some("17".to_string());
        let canvas = compositor.compose(&data).unwrap();
        assert!(ink(&canvas, price_slot) > 0);
        assert!(ink(&canvas, temperature_slot) > 0);
    }
}
