// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather provider configuration and response payloads.

use serde::Deserialize;

/// Contents of `weather_config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    pub endpoints: WeatherEndpoints,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEndpoints {
    pub current_weather: String,
    pub forecast: String,
}

/// Current conditions response.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub sys: SunTimes,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub temp_max: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    /// Metres per second
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub main: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}

/// 3-hourly forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time (Unix seconds)
    pub dt: i64,
    pub main: MainReadings,
    /// Probability of precipitation, 0.0..=1.0
    #[serde(default)]
    pub pop: f64,
}
