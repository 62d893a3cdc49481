// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Managed-backend store client with typed operations.
//!
//! The backend exposes a PostgREST-style REST API over its tables; this
//! wrapper authenticates with the service-role key and provides the
//! high-level operations the pick service needs:
//! - Daily picks (cached recommendations, unique on user_id+pick_date)
//! - Garments (wardrobe inventory, read-only here)

use crate::db::{tables, PickStore};
use crate::error::AppError;
use crate::models::{DailyPick, Garment};
use async_trait::async_trait;
use chrono::NaiveDate;

/// REST client for the managed backend's data API.
#[derive(Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestStore {
    /// Create a new store client.
    ///
    /// `base_url` is the backend root; the data API lives under
    /// `/rest/v1`.
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Apply auth headers common to every request.
    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn check_rows<T: for<'de> serde::Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<Vec<T>, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Database(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Malformed store response: {}", e)))
    }

    async fn check_ok(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Database(format!("HTTP {}: {}", status, body)))
    }
}

#[async_trait]
impl PickStore for RestStore {
    async fn get_pick(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyPick>, AppError> {
        let response = self
            .authed(self.http.get(self.table_url(tables::DAILY_PICKS)))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("pick_date", format!("eq.{}", date)),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<DailyPick> = self.check_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn upsert_pick(&self, pick: &DailyPick) -> Result<DailyPick, AppError> {
        // Atomic on-conflict merge keeps the one-record-per-day invariant
        // without a separate delete.
        let response = self
            .authed(self.http.post(self.table_url(tables::DAILY_PICKS)))
            .query(&[("on_conflict", "user_id,pick_date")])
            .header(
                "Prefer",
                "resolution=merge-duplicates,return=representation",
            )
            .json(pick)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<DailyPick> = self.check_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Database("Upsert returned no representation".to_string()))
    }

    async fn delete_pick(&self, user_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let response = self
            .authed(self.http.delete(self.table_url(tables::DAILY_PICKS)))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("pick_date", format!("eq.{}", date)),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_ok(response).await
    }

    async fn set_pick_image(
        &self,
        user_id: &str,
        date: NaiveDate,
        image_url: &str,
    ) -> Result<(), AppError> {
        let response = self
            .authed(self.http.patch(self.table_url(tables::DAILY_PICKS)))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("pick_date", format!("eq.{}", date)),
            ])
            .json(&serde_json::json!({ "image_url": image_url }))
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_ok(response).await
    }

    async fn update_pick_flags(
        &self,
        user_id: &str,
        date: NaiveDate,
        is_liked: Option<bool>,
        was_logged: Option<bool>,
    ) -> Result<DailyPick, AppError> {
        let mut patch = serde_json::Map::new();
        if let Some(liked) = is_liked {
            patch.insert("is_liked".to_string(), liked.into());
        }
        if let Some(logged) = was_logged {
            patch.insert("was_logged".to_string(), logged.into());
        }
        if patch.is_empty() {
            return Err(AppError::BadRequest("No flags to update".to_string()));
        }

        let response = self
            .authed(self.http.patch(self.table_url(tables::DAILY_PICKS)))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("pick_date", format!("eq.{}", date)),
            ])
            .header("Prefer", "return=representation")
            .json(&serde_json::Value::Object(patch))
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<DailyPick> = self.check_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No pick for {}", date)))
    }

    async fn list_garments(&self, user_id: &str) -> Result<Vec<Garment>, AppError> {
        let response = self
            .authed(self.http.get(self.table_url(tables::GARMENTS)))
            .query(&[
                ("user_id", format!("eq.{}", user_id)),
                ("order", "category".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_rows(response).await
    }
}
