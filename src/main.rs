// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ChronoWear API Server
//!
//! Serves weather-aware daily outfit picks: caches one recommendation
//! per user per day and regenerates it when the user has moved far
//! enough that the cached weather no longer applies.

use chronowear::{
    config::Config,
    db::RestStore,
    geo::Coordinates,
    services::{
        DailyPickService, ImageClient, IpGeoClient, OpenMeteoClient, ProductSearchClient,
        StylistClient,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting ChronoWear API");

    // Managed backend store (picks + wardrobe inventory)
    let store = RestStore::new(&config.backend_url, &config.backend_service_key);
    tracing::info!(backend = %config.backend_url, "Store client initialized");

    // External collaborators
    let weather = OpenMeteoClient::new();
    let stylist = StylistClient::new(&config.ai_api_url, &config.ai_api_key, &config.stylist_model);
    let imagegen = ImageClient::new(&config.ai_api_url, &config.ai_api_key, &config.image_model);
    let lookup = ProductSearchClient::new(
        config.product_search_url.clone(),
        config.product_search_key.clone(),
    );
    let geolocation = IpGeoClient::new(&config.geoip_url);
    tracing::info!(
        stylist_model = %config.stylist_model,
        image_model = %config.image_model,
        product_lookup = config.product_search_url.is_some(),
        "AI services initialized"
    );

    let picks = DailyPickService::new(
        Arc::new(store),
        Arc::new(weather),
        Arc::new(stylist),
        Arc::new(imagegen),
        Arc::new(lookup),
        Arc::new(geolocation),
        Coordinates::new(config.default_latitude, config.default_longitude),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        picks,
    });

    // Build router
    let app = chronowear::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chronowear=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
