//! Database layer (managed backend REST API).

pub mod rest;

pub use rest::RestStore;

use crate::error::AppError;
use crate::models::{DailyPick, Garment};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Table names as constants.
pub mod tables {
    pub const DAILY_PICKS: &str = "daily_picks";
    pub const GARMENTS: &str = "garments";
}

/// Keyed record store for picks and the read-only wardrobe inventory.
///
/// Picks are unique on `(user_id, pick_date)`; `upsert_pick` is
/// update-on-conflict on that key, which is the only safety net when two
/// requests race a regeneration for the same key (last write wins).
#[async_trait]
pub trait PickStore: Send + Sync {
    /// Get the pick for `(user_id, date)`, if one exists.
    async fn get_pick(&self, user_id: &str, date: NaiveDate)
        -> Result<Option<DailyPick>, AppError>;

    /// Insert or replace the pick for its `(user_id, pick_date)` slot.
    /// Returns the stored record (with its surrogate id).
    async fn upsert_pick(&self, pick: &DailyPick) -> Result<DailyPick, AppError>;

    /// Delete the pick for `(user_id, date)`. No-op if absent.
    async fn delete_pick(&self, user_id: &str, date: NaiveDate) -> Result<(), AppError>;

    /// Patch only the image URL of a stored pick (async image synthesis).
    async fn set_pick_image(
        &self,
        user_id: &str,
        date: NaiveDate,
        image_url: &str,
    ) -> Result<(), AppError>;

    /// Patch the user-settable flags of a stored pick.
    async fn update_pick_flags(
        &self,
        user_id: &str,
        date: NaiveDate,
        is_liked: Option<bool>,
        was_logged: Option<bool>,
    ) -> Result<DailyPick, AppError>;

    /// List the user's wardrobe inventory.
    async fn list_garments(&self, user_id: &str) -> Result<Vec<Garment>, AppError>;
}
