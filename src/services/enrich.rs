// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outfit item enrichment.
//!
//! Turns the stylist's abstractly-described items into display-ready
//! ones: owned garments are ground truth (their photo, color, material,
//! and category override the stylist's guess), unowned brand+model items
//! get a best-effort product photo, and everything else passes through.

use crate::models::{Garment, OutfitItem};
use crate::services::lookup::ProductImageLookup;
use crate::services::stylist::CandidateItem;
use futures_util::future::join_all;

/// Enrich every candidate item against the inventory.
///
/// Lookups for distinct items run concurrently; the output preserves the
/// input (display) order.
pub async fn enrich_items(
    items: Vec<CandidateItem>,
    inventory: &[Garment],
    lookup: &dyn ProductImageLookup,
) -> Vec<OutfitItem> {
    join_all(
        items
            .into_iter()
            .map(|item| enrich_item(item, inventory, lookup)),
    )
    .await
}

async fn enrich_item(
    item: CandidateItem,
    inventory: &[Garment],
    lookup: &dyn ProductImageLookup,
) -> OutfitItem {
    let (brand, model) = match (&item.brand, &item.model) {
        (Some(b), Some(m)) => (b.clone(), m.clone()),
        // No brand/model (e.g. a hairstyle suggestion): pass through.
        _ => {
            return OutfitItem {
                category: item.category,
                name: item.name,
                brand: item.brand,
                model: item.model,
                color: item.color,
                material: item.material,
                from_closet: false,
                image_url: None,
                garment_id: None,
            }
        }
    };

    if let Some(owned) = match_garment(&brand, &model, inventory) {
        // The owned item is ground truth; prefer its attributes.
        return OutfitItem {
            category: owned.category.clone(),
            name: item.name,
            brand: Some(brand),
            model: Some(model),
            color: owned.color.clone().or(item.color),
            material: owned.material.clone().or(item.material),
            from_closet: true,
            image_url: owned.image_url.clone(),
            garment_id: Some(owned.id.clone()),
        };
    }

    // Unowned: try to find a representative product photo. Failures are
    // the same as not finding one.
    let image_url = match lookup.find(&brand, &model).await {
        Ok(found) => found,
        Err(err) => {
            tracing::debug!(%brand, %model, error = %err, "Product image lookup failed");
            None
        }
    };

    OutfitItem {
        category: item.category,
        name: item.name,
        brand: Some(brand),
        model: Some(model),
        color: item.color,
        material: item.material,
        from_closet: false,
        image_url,
        garment_id: None,
    }
}

/// Find an owned garment matching brand+model, case-insensitively.
fn match_garment<'a>(brand: &str, model: &str, inventory: &'a [Garment]) -> Option<&'a Garment> {
    inventory.iter().find(|g| {
        matches!(
            (&g.brand, &g.model),
            (Some(b), Some(m))
                if b.eq_ignore_ascii_case(brand) && m.eq_ignore_ascii_case(model)
        )
    })
}
