// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather for the chosen city: current conditions plus today's forecast.

use crate::error::AppError;
use crate::models::preferences::Units;
use crate::models::weather::{CurrentWeather, Forecast};
use crate::models::WeatherConfig;
use crate::time_utils::{format_clock, local_from_unix};
use chrono::NaiveDate;
use serde::Deserialize;

/// Weather API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
    units: Units,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, config: WeatherConfig, units: Units) -> Self {
        Self {
            http,
            config,
            units,
        }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub async fn current(&self, city: &str) -> Result<CurrentWeather, AppError> {
        self.get_json(&self.config.endpoints.current_weather, city)
            .await
    }

    pub async fn forecast(&self, city: &str) -> Result<Forecast, AppError> {
        self.get_json(&self.config.endpoints.forecast, city).await
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        city: &str,
    ) -> Result<T, AppError> {
        tracing::debug!(city = %urlencoding::encode(city), url, "Fetching weather");

        let response = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::transport("weather", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::status("weather", status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::transport("weather", format!("JSON parse error: {}", e)))
    }
}

/// Display values for the weather pane. Missing values are not drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    pub temperature: Option<String>,
    pub daily_high: Option<String>,
    pub wind: Option<String>,
    pub rain_chance: String,
    pub condition: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl WeatherReport {
    /// Derive the report from whichever responses were fetched successfully.
    pub fn from_responses(
        current: Option<&CurrentWeather>,
        forecast: Option<&Forecast>,
        today: NaiveDate,
    ) -> Self {
        let daily_high = forecast
            .and_then(|f| forecast_high_for(f, today))
            .or_else(|| current.map(|c| c.main.temp_max))
            .map(format_temperature);

        Self {
            temperature: current.map(|c| format_temperature(c.main.temp)),
            daily_high,
            wind: current.map(|c| wind_level(c.wind.speed).to_string()),
            rain_chance: rain_chance(forecast),
            condition: current.and_then(|c| c.weather.first().map(|w| simple_condition(&w.main))),
            sunrise: current.and_then(|c| format_clock(c.sys.sunrise)),
            sunset: current.and_then(|c| format_clock(c.sys.sunset)),
        }
    }
}

/// Weather service combining one current and one forecast request per render.
#[derive(Clone)]
pub struct WeatherService {
    client: WeatherClient,
}

impl WeatherService {
    pub fn new(client: WeatherClient) -> Self {
        Self { client }
    }

    pub fn units(&self) -> Units {
        self.client.units()
    }

    /// Fetch both endpoints and build the report; failures blank the
    /// dependent fields.
    pub async fn report(&self, city: &str, today: NaiveDate) -> WeatherReport {
        let (current, forecast) =
            tokio::join!(self.client.current(city), self.client.forecast(city));

        let current = current
            .map_err(|e| tracing::warn!(city, error = %e, "Error getting current weather data"))
            .ok();
        let forecast = forecast
            .map_err(|e| tracing::warn!(city, error = %e, "Error getting forecast weather data"))
            .ok();

        WeatherReport::from_responses(current.as_ref(), forecast.as_ref(), today)
    }
}

/// Round half-to-even and print without decimals.
fn format_temperature(temp: f64) -> String {
    format!("{}", temp.round_ties_even() as i64)
}

/// Highest forecast `temp_max` whose local date is `today`.
fn forecast_high_for(forecast: &Forecast, today: NaiveDate) -> Option<f64> {
    forecast
        .list
        .iter()
        .filter(|entry| local_from_unix(entry.dt).is_some_and(|dt| dt.date_naive() == today))
        .map(|entry| entry.main.temp_max)
        .fold(None, |max: Option<f64>, t| Some(max.map_or(t, |m| m.max(t))))
}

/// Bucket a wind speed (m/s) into a coarse label.
pub fn wind_level(speed_ms: f64) -> &'static str {
    if speed_ms < 1.5 {
        "Very Low"
    } else if speed_ms < 3.5 {
        "Low"
    } else if speed_ms < 6.0 {
        "Medium"
    } else if speed_ms < 10.0 {
        "High"
    } else {
        "Very High"
    }
}

/// Chance of rain in the next forecast slot, e.g. "40%".
pub fn rain_chance(forecast: Option<&Forecast>) -> String {
    match forecast.and_then(|f| f.list.first()) {
        Some(next) => format!("{}%", (next.pop * 100.0).round_ties_even() as i64),
        None => "0%".to_string(),
    }
}

/// Map the provider's condition group to a short label.
pub fn simple_condition(main: &str) -> String {
    match main.to_lowercase().as_str() {
        "clear" => "Clear".to_string(),
        "clouds" => "Cloudy".to_string(),
        "rain" | "drizzle" => "Rain".to_string(),
        "thunderstorm" => "Thunder".to_string(),
        "snow" => "Snow".to_string(),
        "mist" | "fog" | "haze" => "Foggy".to_string(),
        _ => main.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::{Condition, ForecastEntry, MainReadings, SunTimes, Wind};
    use chrono::{Local, TimeZone};

    fn current(temp: f64, temp_max: f64, wind: f64, main: &str) -> CurrentWeather {
        CurrentWeather {
            main: MainReadings { temp, temp_max },
            wind: Wind { speed: wind },
            weather: vec![Condition {
                main: main.to_string(),
            }],
            sys: SunTimes {
                sunrise: 0,
                sunset: 0,
            },
        }
    }

    fn entry_at(today: NaiveDate, hour: u32, temp_max: f64, pop: f64) -> ForecastEntry {
        let dt = Local
            .from_local_datetime(&today.and_hms_opt(hour, 0, 0).unwrap())
            .earliest()
            .unwrap();
        ForecastEntry {
            dt: dt.timestamp(),
            main: MainReadings {
                temp: temp_max,
                temp_max,
            },
            pop,
        }
    }

    #[test]
    fn test_wind_levels() {
        assert_eq!(wind_level(0.0), "Very Low");
        assert_eq!(wind_level(1.5), "Low");
        assert_eq!(wind_level(3.4), "Low");
        assert_eq!(wind_level(5.9), "Medium");
        assert_eq!(wind_level(6.0), "High");
        assert_eq!(wind_level(10.0), "Very High");
    }

    #[test]
    fn test_simple_condition_mapping() {
        assert_eq!(simple_condition("Clear"), "Clear");
        assert_eq!(simple_condition("Clouds"), "Cloudy");
        assert_eq!(simple_condition("Drizzle"), "Rain");
        assert_eq!(simple_condition("Thunderstorm"), "Thunder");
        assert_eq!(simple_condition("Haze"), "Foggy");
        assert_eq!(simple_condition("Tornado"), "Tornado");
    }

    #[test]
    fn test_rain_chance() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let forecast = Forecast {
            list: vec![entry_at(today, 9, 12.0, 0.37)],
        };
        assert_eq!(rain_chance(Some(&forecast)), "37%");
        assert_eq!(rain_chance(Some(&Forecast { list: vec![] })), "0%");
        assert_eq!(rain_chance(None), "0%");
    }

    #[test]
    fn test_daily_high_from_todays_forecast() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let forecast = Forecast {
            list: vec![
                entry_at(today, 9, 12.4, 0.1),
                entry_at(today, 15, 16.6, 0.0),
                entry_at(tomorrow, 12, 25.0, 0.0),
            ],
        };
        let now = current(11.5, 14.0, 2.0, "Clouds");

        let report = WeatherReport::from_responses(Some(&now), Some(&forecast), today);

        assert_eq!(report.daily_high.as_deref(), Some("17"));
        assert_eq!(report.temperature.as_deref(), Some("12"));
        assert_eq!(report.wind.as_deref(), Some("Low"));
        assert_eq!(report.condition.as_deref(), Some("Cloudy"));
        assert_eq!(report.rain_chance, "10%");
    }

    #[test]
    fn test_daily_high_falls_back_to_current() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let forecast = Forecast {
            list: vec![entry_at(tomorrow, 12, 25.0, 0.0)],
        };
        let now = current(11.5, 14.0, 2.0, "Clear");

        let report = WeatherReport::from_responses(Some(&now), Some(&forecast), today);
        assert_eq!(report.daily_high.as_deref(), Some("14"));

        let report = WeatherReport::from_responses(Some(&now), None, today);
        assert_eq!(report.daily_high.as_deref(), Some("14"));
    }

    #[test]
    fn test_everything_missing() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let report = WeatherReport::from_responses(None, None, today);
        assert_eq!(
            report,
            WeatherReport {
                rain_chance: "0%".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_temperature_rounds_half_to_even() {
        assert_eq!(format_temperature(2.5), "2");
        assert_eq!(format_temperature(3.5), "4");
        assert_eq!(format_temperature(-0.4), "0");
    }
}
