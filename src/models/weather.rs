// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weather snapshot model.

use crate::geo::Coordinates;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A weather reading, stored verbatim inside a pick and never mutated.
///
/// The coordinates record where the reading was fetched for; they drive
/// the location-drift staleness check. They are optional so that records
/// written before coordinates were tracked deserialize cleanly (such
/// records are always treated as stale).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeatherReading {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Current temperature (°C)
    pub temperature: f64,
    /// Human-readable conditions ("Clear sky", "Light rain", ...)
    pub description: String,
    /// Current UV index
    pub uv_index: f64,
    /// Daily minimum temperature (°C)
    #[serde(default)]
    pub temp_min: Option<f64>,
    /// Daily maximum temperature (°C)
    #[serde(default)]
    pub temp_max: Option<f64>,
}

impl WeatherReading {
    /// The coordinates this reading was fetched for, if recorded.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}
