// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed pixel layout of the dashboard background.

use plotters::style::RGBColor;

/// Every value drawn on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PriceName,
    PriceCurrent,
    PriceCurrentMetric,
    Price24h,
    Price24hMetric,
    Price7d,
    Price7dMetric,
    PriceChart,

    NewsTitle,
    NewsAbstract,
    NewsImage,

    AgilityTitle,
    AgilityMetric,
    StrengthTitle,
    StrengthMetric,

    WeatherTitle,
    WeatherTemperature,
    WeatherWind,
    WeatherRain,
    WeatherCondition,
    WeatherSunset,
    WeatherSunrise,

    Date,
    Time,
}

impl Field {
    /// Top-left anchor in background pixels.
    ///
    /// For `Date` and `Time` only the y coordinate is used; both are centered
    /// on [`CLOCK_CENTER_X`].
    pub const fn position(self) -> (i32, i32) {
        match self {
            Field::PriceName => (86, 185),
            Field::PriceCurrent => (86, 210),
            Field::PriceCurrentMetric => (150, 210),
            Field::Price24h => (86, 227),
            Field::Price24hMetric => (150, 227),
            Field::Price7d => (86, 244),
            Field::Price7dMetric => (150, 244),
            Field::PriceChart => (200, 177),

            Field::NewsTitle => (438, 185),
            Field::NewsAbstract => (438, 205),
            Field::NewsImage => (620, 210),

            Field::AgilityTitle => (115, 342),
            Field::AgilityMetric => (260, 342),
            Field::StrengthTitle => (115, 400),
            Field::StrengthMetric => (260, 400),

            Field::WeatherTitle => (438, 341),
            Field::WeatherTemperature => (478, 373),
            Field::WeatherWind => (582, 407),
            Field::WeatherRain => (582, 373),
            Field::WeatherCondition => (478, 407),
            Field::WeatherSunset => (686, 407),
            Field::WeatherSunrise => (686, 373),

            Field::Date => (CLOCK_CENTER_X, 37),
            Field::Time => (CLOCK_CENTER_X, 57),
        }
    }
}

/// Horizontal center of the clock and date lines.
pub const CLOCK_CENTER_X: i32 = 605;

/// Abstract wrap width and line spacing.
pub const ABSTRACT_MAX_WIDTH: u32 = 175;
pub const ABSTRACT_LINE_HEIGHT: i32 = 15;

/// Progress bars.
pub const AGILITY_BAR: (i32, i32) = (85, 368);
pub const STRENGTH_BAR: (i32, i32) = (85, 426);
pub const BAR_WIDTH: i32 = 245;
pub const BAR_HEIGHT: i32 = 11;
pub const BAR_FILL: RGBColor = RGBColor(153, 71, 4);
pub const BAR_BACKGROUND: RGBColor = RGBColor(0, 0, 0);

/// Filled width of a progress bar for a percentage (clamped to 0..=100).
pub fn bar_fill_width(percentage: f64) -> i32 {
    (BAR_WIDTH as f64 * percentage.clamp(0.0, 100.0) / 100.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill_width() {
        assert_eq!(bar_fill_width(0.0), 0);
        assert_eq!(bar_fill_width(50.0), 122);
        assert_eq!(bar_fill_width(100.0), BAR_WIDTH);
        assert_eq!(bar_fill_width(140.0), BAR_WIDTH);
        assert_eq!(bar_fill_width(-5.0), 0);
    }

    #[test]
    fn test_clock_and_date_share_center() {
        assert_eq!(Field::Date.position().0, CLOCK_CENTER_X);
        assert_eq!(Field::Time.position().0, CLOCK_CENTER_X);
        assert!(Field::Date.position().1 < Field::Time.position().1);
    }
}
