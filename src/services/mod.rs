// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod daily_pick;
pub mod enrich;
pub mod geolocate;
pub mod imagegen;
pub mod lookup;
pub mod stylist;
pub mod weather;

pub use daily_pick::{CacheDecision, DailyPickService, RefreshReason};
pub use geolocate::{GeolocationSource, IpGeoClient};
pub use imagegen::{ImageClient, ImageSynthesizer};
pub use lookup::{ProductImageLookup, ProductSearchClient};
pub use stylist::{OutfitCandidate, OutfitRecommender, StylistClient};
pub use weather::{OpenMeteoClient, WeatherProvider};
