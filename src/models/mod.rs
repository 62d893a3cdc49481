// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod garment;
pub mod pick;
pub mod weather;

pub use garment::Garment;
pub use pick::{DailyPick, OutfitItem};
pub use weather::WeatherReading;
