// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! ChronoWear: wardrobe management with weather-aware daily outfit picks.
//!
//! This crate provides the backend API that decides when a cached
//! "Today's Pick" can be reused and drives regeneration through the
//! weather, stylist, and image-synthesis services when it cannot.

pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::DailyPickService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub picks: DailyPickService,
}
