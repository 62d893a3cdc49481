// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outfit image synthesis (best-effort, fire-and-forget).

use crate::error::AppError;
use crate::services::stylist::OutfitCandidate;
use async_trait::async_trait;
use serde::Deserialize;

/// Produces a representative image URL for an outfit.
///
/// Callers invoke this from a detached task and swallow failures; a pick
/// is complete without its image.
#[async_trait]
pub trait ImageSynthesizer: Send + Sync {
    async fn synthesize(&self, outfit: &OutfitCandidate) -> Result<String, AppError>;
}

/// OpenAI-compatible image generation client.
#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ImageClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    fn prompt(outfit: &OutfitCandidate) -> String {
        let items = outfit
            .items
            .iter()
            .map(|i| {
                let mut desc = String::new();
                if let Some(color) = &i.color {
                    desc.push_str(color);
                    desc.push(' ');
                }
                desc.push_str(&i.name);
                desc
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Flat-lay product photo of an outfit on a neutral background: {}. \
             No people, no text.",
            items
        )
    }
}

#[async_trait]
impl ImageSynthesizer for ImageClient {
    async fn synthesize(&self, outfit: &OutfitCandidate) -> Result<String, AppError> {
        let url = format!("{}/images/generations", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "prompt": Self::prompt(outfit),
            "n": 1,
            "size": "1024x1024",
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Image request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(anyhow::anyhow!(
                "Image HTTP {}: {}",
                status,
                body
            )));
        }

        let generated: ImageResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Image JSON parse error: {}", e)))?;

        generated
            .data
            .into_iter()
            .next()
            .map(|d| d.url)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Image response had no data")))
    }
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stylist::fallback_candidate;

    #[test]
    fn test_prompt_lists_items_with_colors() {
        let prompt = ImageClient::prompt(&fallback_candidate());
        assert!(prompt.contains("white Plain white tee"));
        assert!(prompt.contains("indigo Straight-leg jeans"));
        assert!(prompt.contains("No people"));
    }
}
