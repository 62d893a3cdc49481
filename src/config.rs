// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The managed backend (persistence + auth) and the hosted AI endpoints
//! are all reached over HTTP, so configuration is just URLs and keys,
//! loaded once at startup.

use std::env;

/// Fallback coordinates used when the caller's location cannot be
/// resolved (Tokyo).
pub const DEFAULT_LATITUDE: f64 = 35.6764;
pub const DEFAULT_LONGITUDE: f64 = 139.6500;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Managed backend (persistence + auth) ---
    /// Base URL of the managed backend (REST API root)
    pub backend_url: String,
    /// Service-role key for server-side store access
    pub backend_service_key: String,
    /// HS256 secret used to verify session JWTs issued by the backend
    pub backend_jwt_secret: Vec<u8>,

    // --- Hosted AI endpoints ---
    /// Base URL of the OpenAI-compatible API
    pub ai_api_url: String,
    /// API key for the AI endpoints
    pub ai_api_key: String,
    /// Chat model used for outfit recommendations
    pub stylist_model: String,
    /// Image model used for outfit visualization
    pub image_model: String,

    // --- Auxiliary lookups ---
    /// IP geolocation endpoint (fallback when the client sends no coords)
    pub geoip_url: String,
    /// Product image search endpoint (optional; lookups disabled if unset)
    pub product_search_url: Option<String>,
    /// API key for the product image search endpoint
    pub product_search_key: Option<String>,

    // --- Server ---
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Default latitude when geolocation fails
    pub default_latitude: f64,
    /// Default longitude when geolocation fails
    pub default_longitude: f64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            backend_url: env::var("BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("BACKEND_URL"))?,
            backend_service_key: env::var("BACKEND_SERVICE_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("BACKEND_SERVICE_KEY"))?,
            backend_jwt_secret: env::var("BACKEND_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("BACKEND_JWT_SECRET"))?
                .into_bytes(),

            ai_api_url: env::var("AI_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            ai_api_key: env::var("AI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("AI_API_KEY"))?,
            stylist_model: env::var("STYLIST_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            image_model: env::var("IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".to_string()),

            geoip_url: env::var("GEOIP_URL")
                .unwrap_or_else(|_| "http://ip-api.com/json".to_string()),
            product_search_url: env::var("PRODUCT_SEARCH_URL").ok(),
            product_search_key: env::var("PRODUCT_SEARCH_KEY").ok(),

            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            default_latitude: env::var("DEFAULT_LATITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LATITUDE),
            default_longitude: env::var("DEFAULT_LONGITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LONGITUDE),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            backend_url: "http://localhost:54321".to_string(),
            backend_service_key: "test_service_key".to_string(),
            backend_jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            ai_api_url: "http://localhost:9999/v1".to_string(),
            ai_api_key: "test_ai_key".to_string(),
            stylist_model: "gpt-4o-mini".to_string(),
            image_model: "dall-e-3".to_string(),
            geoip_url: "http://localhost:9999/geoip".to_string(),
            product_search_url: None,
            product_search_key: None,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
