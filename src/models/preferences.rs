// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User preferences loaded from `user_preferences.json`.

use serde::Deserialize;

/// Read-only user preferences.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPreferences {
    pub fitness_targets: FitnessTargets,
    pub weather: WeatherPreferences,
    /// Market item shown in the price pane (name or numeric id)
    pub tracked_item: String,
}

/// Weekly fitness goals.
#[derive(Debug, Clone, Deserialize)]
pub struct FitnessTargets {
    pub running_km_per_week: f64,
    pub weight_training_hours_per_week: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherPreferences {
    pub chosen_city: String,
    #[serde(default)]
    pub default_units: Units,
}

/// Unit system passed to the weather provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Query parameter value for the weather API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature suffix shown on the dashboard.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preferences() {
        let json = r#"{
            "fitness_targets": {"running_km_per_week": 20, "weight_training_hours_per_week": 3.5},
            "weather": {"chosen_city": "london", "default_units": "imperial"},
            "tracked_item": "dragon bones"
        }"#;
        let prefs: UserPreferences = serde_json::from_str(json).unwrap();

        assert_eq!(prefs.fitness_targets.running_km_per_week, 20.0);
        assert_eq!(prefs.weather.default_units, Units::Imperial);
        assert_eq!(prefs.weather.default_units.temperature_suffix(), "F");
        assert_eq!(prefs.tracked_item, "dragon bones");
    }
}
