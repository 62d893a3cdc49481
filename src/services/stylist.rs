// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outfit recommender: hosted AI stylist plus the hardcoded fallback.
//!
//! The stylist is best-effort by design. When the hosted model is down
//! or returns something unparseable, the caller falls back to
//! [`fallback_candidate`] so a pick request always produces an outfit.

use crate::error::AppError;
use crate::models::{Garment, WeatherReading};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Produces an outfit candidate for the given weather and inventory.
#[async_trait]
pub trait OutfitRecommender: Send + Sync {
    async fn recommend(
        &self,
        weather: &WeatherReading,
        inventory: &[Garment],
    ) -> Result<OutfitCandidate, AppError>;
}

/// A recommended outfit, before enrichment against the inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutfitCandidate {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub hairstyle_note: Option<String>,
    pub items: Vec<CandidateItem>,
}

/// One abstractly-described item of a candidate outfit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
}

/// The fixed outfit used when the stylist is unavailable.
///
/// Deliberately brandless: enrichment still runs over it, but generic
/// items never falsely claim a closet match.
pub fn fallback_candidate() -> OutfitCandidate {
    OutfitCandidate {
        title: "Classic everyday basics".to_string(),
        summary: "A simple, weather-safe combination that works on its own \
                  or under an extra layer."
            .to_string(),
        hairstyle_note: None,
        items: vec![
            CandidateItem {
                category: "top".to_string(),
                name: "Plain white tee".to_string(),
                brand: None,
                model: None,
                color: Some("white".to_string()),
                material: Some("cotton".to_string()),
            },
            CandidateItem {
                category: "bottom".to_string(),
                name: "Straight-leg jeans".to_string(),
                brand: None,
                model: None,
                color: Some("indigo".to_string()),
                material: Some("denim".to_string()),
            },
            CandidateItem {
                category: "shoes".to_string(),
                name: "White leather sneakers".to_string(),
                brand: None,
                model: None,
                color: Some("white".to_string()),
                material: Some("leather".to_string()),
            },
        ],
    }
}

/// OpenAI-compatible chat-completions client acting as the stylist.
#[derive(Clone)]
pub struct StylistClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl StylistClient {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Compact inventory description for the prompt. Only identifying
    /// fields; photos and IDs stay server-side.
    fn inventory_summary(inventory: &[Garment]) -> String {
        if inventory.is_empty() {
            return "(empty closet)".to_string();
        }
        inventory
            .iter()
            .map(|g| {
                let mut parts = vec![format!("{}: {}", g.category, g.name)];
                if let (Some(brand), Some(model)) = (&g.brand, &g.model) {
                    parts.push(format!("{} {}", brand, model));
                }
                if let Some(color) = &g.color {
                    parts.push(color.clone());
                }
                format!("- {}", parts.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl OutfitRecommender for StylistClient {
    async fn recommend(
        &self,
        weather: &WeatherReading,
        inventory: &[Garment],
    ) -> Result<OutfitCandidate, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let system = "You are a personal stylist. Respond with a single JSON object: \
                      {\"title\", \"summary\", \"hairstyle_note\", \"items\": \
                      [{\"category\", \"name\", \"brand\", \"model\", \"color\", \"material\"}]}. \
                      Prefer items the user already owns. Use null for unknown fields.";

        let user = format!(
            "Weather: {} / {:.1}°C (min {:?}, max {:?}), UV index {:.1}.\n\
             Closet:\n{}",
            weather.description,
            weather.temperature,
            weather.temp_min,
            weather.temp_max,
            weather.uv_index,
            Self::inventory_summary(inventory),
        );

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "response_format": {"type": "json_object"},
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Stylist request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Internal(anyhow::anyhow!(
                "Stylist HTTP {}: {}",
                status,
                body
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Stylist JSON parse error: {}", e))
        })?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Stylist returned no choices")))?;

        let candidate: OutfitCandidate = serde_json::from_str(content).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Malformed stylist output: {}", e))
        })?;

        if candidate.items.is_empty() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "Stylist returned an empty outfit"
            )));
        }

        Ok(candidate)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
