// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product image lookup for items the user does not own.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

/// Finds a representative product photo for a brand + model pair.
///
/// Best-effort: `Ok(None)` when nothing is found, and callers treat
/// errors the same as absence.
#[async_trait]
pub trait ProductImageLookup: Send + Sync {
    async fn find(&self, brand: &str, model: &str) -> Result<Option<String>, AppError>;
}

/// HTTP product image search client.
///
/// When no endpoint is configured the client is disabled and every
/// lookup resolves to absent.
#[derive(Clone)]
pub struct ProductSearchClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl ProductSearchClient {
    pub fn new(endpoint: Option<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl ProductImageLookup for ProductSearchClient {
    async fn find(&self, brand: &str, model: &str) -> Result<Option<String>, AppError> {
        let Some(endpoint) = &self.endpoint else {
            return Ok(None);
        };

        let mut request = self
            .http
            .get(endpoint)
            .query(&[("q", format!("{} {}", brand, model))]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Product lookup failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Product lookup HTTP {}",
                response.status()
            )));
        }

        let results: SearchResponse = response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Product lookup parse error: {}", e))
        })?;

        Ok(results.results.into_iter().next().map(|r| r.image_url))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    image_url: String,
}
