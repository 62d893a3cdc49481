// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily pick cache policy and regeneration orchestration.
//!
//! The core workflow:
//! 1. Look up the cached pick for (user, date)
//! 2. Decide whether it is still trustworthy (missing, forced, moved
//!    too far from where its weather was fetched)
//! 3. On refresh: weather → stylist (with fallback) → enrichment →
//!    upsert, then detach image synthesis to patch the record later
//!
//! The service holds no state between calls; concurrent requests for
//! different keys are trivially safe. Two requests racing the same
//! (user, date) key may both regenerate; the store's upsert-by-unique-key
//! is the accepted safety net (last write wins). This mirrors the
//! guarantees of the original system rather than adding locking.

use crate::db::PickStore;
use crate::error::{AppError, Result};
use crate::geo::{haversine_km, Coordinates, STALE_DISTANCE_KM};
use crate::models::DailyPick;
use crate::services::enrich::enrich_items;
use crate::services::geolocate::GeolocationSource;
use crate::services::imagegen::ImageSynthesizer;
use crate::services::lookup::ProductImageLookup;
use crate::services::stylist::{fallback_candidate, OutfitCandidate, OutfitRecommender};
use crate::services::weather::WeatherProvider;
use crate::time_utils::format_utc_rfc3339;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

/// How long to wait for IP geolocation before using the default
/// location.
const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Why a cached pick cannot be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// No record exists for the key
    Miss,
    /// Caller explicitly requested regeneration
    Forced,
    /// Stored snapshot has no coordinates to compare against
    MissingCoordinates,
    /// Caller moved beyond the drift threshold
    LocationDrift,
}

impl RefreshReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshReason::Miss => "miss",
            RefreshReason::Forced => "forced",
            RefreshReason::MissingCoordinates => "missing_coordinates",
            RefreshReason::LocationDrift => "location_drift",
        }
    }
}

/// Outcome of the staleness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheDecision {
    /// Return the cached record unchanged
    Fresh,
    /// Regenerate
    Refresh(RefreshReason),
}

/// Decide whether a cached pick can be reused for a caller at `current`.
pub fn evaluate_cache(
    existing: Option<&DailyPick>,
    current: Coordinates,
    force: bool,
) -> CacheDecision {
    let Some(pick) = existing else {
        return CacheDecision::Refresh(RefreshReason::Miss);
    };

    if force {
        return CacheDecision::Refresh(RefreshReason::Forced);
    }

    let Some(snapshot) = pick.weather.coordinates() else {
        return CacheDecision::Refresh(RefreshReason::MissingCoordinates);
    };

    if haversine_km(snapshot, current) > STALE_DISTANCE_KM {
        CacheDecision::Refresh(RefreshReason::LocationDrift)
    } else {
        CacheDecision::Fresh
    }
}

/// Decides when a cached daily pick is stale and drives regeneration
/// through the injected collaborators.
#[derive(Clone)]
pub struct DailyPickService {
    store: Arc<dyn PickStore>,
    weather: Arc<dyn WeatherProvider>,
    recommender: Arc<dyn OutfitRecommender>,
    synthesizer: Arc<dyn ImageSynthesizer>,
    lookup: Arc<dyn ProductImageLookup>,
    geolocation: Arc<dyn GeolocationSource>,
    default_location: Coordinates,
}

impl DailyPickService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn PickStore>,
        weather: Arc<dyn WeatherProvider>,
        recommender: Arc<dyn OutfitRecommender>,
        synthesizer: Arc<dyn ImageSynthesizer>,
        lookup: Arc<dyn ProductImageLookup>,
        geolocation: Arc<dyn GeolocationSource>,
        default_location: Coordinates,
    ) -> Self {
        Self {
            store,
            weather,
            recommender,
            synthesizer,
            lookup,
            geolocation,
            default_location,
        }
    }

    /// Get the pick for (user, date), regenerating it when missing,
    /// forced, or stale.
    ///
    /// `coords` is the caller's position when the client supplied one;
    /// otherwise IP geolocation is tried under a short timeout before
    /// falling back to the default location.
    pub async fn get_or_generate(
        &self,
        user_id: &str,
        date: NaiveDate,
        coords: Option<Coordinates>,
        force: bool,
    ) -> Result<DailyPick> {
        let current = self.resolve_coordinates(coords).await;

        let existing = self.store.get_pick(user_id, date).await?;

        match evaluate_cache(existing.as_ref(), current, force) {
            CacheDecision::Fresh => {
                tracing::debug!(user_id, %date, "Returning cached pick");
                // evaluate_cache only returns Fresh for an existing record
                existing.ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!("Fresh decision without a record"))
                })
            }
            CacheDecision::Refresh(reason) => {
                tracing::info!(user_id, %date, reason = reason.as_str(), "Regenerating pick");
                self.regenerate(user_id, date, current).await
            }
        }
    }

    /// Resolve the caller's position: client-supplied, IP lookup, or the
    /// default constant. Never fails.
    async fn resolve_coordinates(&self, coords: Option<Coordinates>) -> Coordinates {
        if let Some(c) = coords {
            return c;
        }

        match tokio::time::timeout(GEOLOCATION_TIMEOUT, self.geolocation.current()).await {
            Ok(Ok(c)) => c,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "Geolocation failed, using default location");
                self.default_location
            }
            Err(_) => {
                tracing::warn!("Geolocation timed out, using default location");
                self.default_location
            }
        }
    }

    /// Run the regeneration sequence and persist the result.
    async fn regenerate(
        &self,
        user_id: &str,
        date: NaiveDate,
        coords: Coordinates,
    ) -> Result<DailyPick> {
        // Weather failure is fatal: no recommendation is meaningful
        // without it, and nothing is written.
        let weather = self.weather.fetch(coords).await?;

        let inventory = self.store.list_garments(user_id).await?;

        let candidate = match self.recommender.recommend(&weather, &inventory).await {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::warn!(user_id, error = %err, "Stylist unavailable, using fallback outfit");
                fallback_candidate()
            }
        };

        let items = enrich_items(candidate.items.clone(), &inventory, self.lookup.as_ref()).await;

        let pick = DailyPick {
            id: None,
            user_id: user_id.to_string(),
            pick_date: date,
            title: candidate.title.clone(),
            summary: candidate.summary.clone(),
            hairstyle_note: candidate.hairstyle_note.clone(),
            items,
            weather,
            image_url: None,
            is_liked: false,
            was_logged: false,
            created_at: format_utc_rfc3339(chrono::Utc::now()),
        };

        // Atomic upsert on (user_id, pick_date) replaces any stale
        // record without a window for duplicate-key failures.
        let stored = self.store.upsert_pick(&pick).await?;

        self.spawn_image_patch(user_id.to_string(), date, candidate);

        Ok(stored)
    }

    /// Detached best-effort task: synthesize an outfit image and patch
    /// the stored record. Failures are logged and dropped; the pick is
    /// already complete without its image.
    fn spawn_image_patch(&self, user_id: String, date: NaiveDate, candidate: OutfitCandidate) {
        let synthesizer = Arc::clone(&self.synthesizer);
        let store = Arc::clone(&self.store);

        tokio::spawn(async move {
            let image_url = match synthesizer.synthesize(&candidate).await {
                Ok(url) => url,
                Err(err) => {
                    tracing::warn!(%user_id, %date, error = %err, "Image synthesis failed");
                    return;
                }
            };

            if let Err(err) = store.set_pick_image(&user_id, date, &image_url).await {
                tracing::warn!(%user_id, %date, error = %err, "Failed to patch pick image");
            } else {
                tracing::debug!(%user_id, %date, "Pick image patched");
            }
        });
    }

    /// Set the liked flag on the stored pick.
    pub async fn set_liked(&self, user_id: &str, date: NaiveDate, liked: bool) -> Result<DailyPick> {
        self.store
            .update_pick_flags(user_id, date, Some(liked), None)
            .await
    }

    /// Set the logged (outfit-of-the-day) flag on the stored pick.
    pub async fn set_logged(
        &self,
        user_id: &str,
        date: NaiveDate,
        logged: bool,
    ) -> Result<DailyPick> {
        self.store
            .update_pick_flags(user_id, date, None, Some(logged))
            .await
    }

    /// Clear the slot for (user, date); the next request regenerates.
    pub async fn delete_for_date(&self, user_id: &str, date: NaiveDate) -> Result<()> {
        self.store.delete_pick(user_id, date).await
    }
}
