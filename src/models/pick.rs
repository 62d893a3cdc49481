// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Daily pick model for storage and API.

use crate::models::WeatherReading;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A cached daily outfit recommendation.
///
/// Identity is the `(user_id, pick_date)` composite key; the store keeps
/// at most one record per pair. The surrogate `id` is store-assigned and
/// only exposed for foreign-key convenience.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyPick {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owner
    pub user_id: String,
    /// Calendar date this pick is for (day granularity)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub pick_date: NaiveDate,
    /// Outfit title ("Breezy layers for a mild morning")
    pub title: String,
    /// Styling summary
    pub summary: String,
    /// Optional hairstyle suggestion
    #[serde(default)]
    pub hairstyle_note: Option<String>,
    /// Outfit items; insertion order is display order
    pub items: Vec<OutfitItem>,
    /// The weather this pick was generated for (drives staleness)
    pub weather: WeatherReading,
    /// Generated outfit visualization, patched in asynchronously
    #[serde(default)]
    pub image_url: Option<String>,
    /// User flags, mutated independently of regeneration
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub was_logged: bool,
    /// When this pick was generated (RFC3339)
    pub created_at: String,
}

/// One item of an outfit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OutfitItem {
    /// Category tag (top, bottom, shoes, accessory, hairstyle, ...)
    pub category: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    /// True when the item maps to an owned wardrobe entry
    #[serde(default)]
    pub from_closet: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Back-reference to the owned garment, present iff `from_closet`
    #[serde(default)]
    pub garment_id: Option<String>,
}
