// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weather provider: current conditions for a coordinate pair.
//!
//! Weather is the one collaborator whose failure is fatal to a pick
//! request: there is no meaningful fallback recommendation without it.

use crate::error::AppError;
use crate::geo::Coordinates;
use crate::models::WeatherReading;
use async_trait::async_trait;
use serde::Deserialize;

/// Supplies current conditions for a coordinate pair.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherReading, AppError>;
}

/// Open-Meteo forecast API client (no API key required).
#[derive(Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self::with_base_url("https://api.open-meteo.com")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherReading, AppError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,weather_code,uv_index".to_string(),
                ),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min".to_string(),
                ),
                ("forecast_days", "1".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!("HTTP {}: {}", status, body)));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("JSON parse error: {}", e)))?;

        Ok(WeatherReading {
            // Record the *requested* coordinates, not the grid point the
            // provider snapped to; the staleness check compares against
            // where the user actually was.
            latitude: Some(coords.latitude),
            longitude: Some(coords.longitude),
            temperature: forecast.current.temperature_2m,
            description: describe_weather_code(forecast.current.weather_code).to_string(),
            uv_index: forecast.current.uv_index,
            temp_min: forecast
                .daily
                .as_ref()
                .and_then(|d| d.temperature_2m_min.first().copied()),
            temp_max: forecast
                .daily
                .as_ref()
                .and_then(|d| d.temperature_2m_max.first().copied()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    weather_code: u16,
    #[serde(default)]
    uv_index: f64,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    temperature_2m_min: Vec<f64>,
}

/// Map a WMO weather interpretation code to a short description.
pub fn describe_weather_code(code: u16) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        56 | 57 => "Freezing drizzle",
        61 | 63 | 65 => "Rain",
        66 | 67 => "Freezing rain",
        71 | 73 | 75 | 77 => "Snow",
        80 | 81 | 82 => "Rain showers",
        85 | 86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}
