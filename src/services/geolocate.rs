// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller geolocation via IP lookup.
//!
//! Used only when the client sends no coordinates of its own. The pick
//! service wraps this in a short timeout and falls back to the default
//! location constant, so a slow or denied lookup never blocks a pick.

use crate::error::AppError;
use crate::geo::Coordinates;
use async_trait::async_trait;
use serde::Deserialize;

/// Supplies the caller's current coordinates.
#[async_trait]
pub trait GeolocationSource: Send + Sync {
    async fn current(&self) -> Result<Coordinates, AppError>;
}

/// IP geolocation client (ip-api.com response shape).
#[derive(Clone)]
pub struct IpGeoClient {
    http: reqwest::Client,
    url: String,
}

impl IpGeoClient {
    pub fn new(url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl GeolocationSource for IpGeoClient {
    async fn current(&self) -> Result<Coordinates, AppError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Geolocation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Geolocation HTTP {}",
                response.status()
            )));
        }

        let geo: GeoResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Geolocation parse error: {}", e)))?;

        Ok(Coordinates::new(geo.lat, geo.lon))
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    lat: f64,
    lon: f64,
}
