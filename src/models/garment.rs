// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Wardrobe inventory model.

use serde::{Deserialize, Serialize};

/// An owned wardrobe entry. Read-only to this service; the upload and
/// identification flow that creates these lives in the surrounding app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Garment {
    /// Store-assigned ID (also the `garment_id` back-reference on items)
    pub id: String,
    /// Owner
    pub user_id: String,
    /// Category tag (top, bottom, shoes, outerwear, ...)
    pub category: String,
    /// Display name
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub material: Option<String>,
    /// Photo of the owned item
    pub image_url: Option<String>,
}
