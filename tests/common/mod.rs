// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared in-memory collaborator mocks for integration tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use chronowear::config::Config;
use chronowear::db::PickStore;
use chronowear::error::AppError;
use chronowear::geo::Coordinates;
use chronowear::models::{DailyPick, Garment, WeatherReading};
use chronowear::services::stylist::CandidateItem;
use chronowear::services::{
    DailyPickService, GeolocationSource, ImageSynthesizer, OutfitCandidate, OutfitRecommender,
    ProductImageLookup, WeatherProvider,
};
use chronowear::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store keyed by (user_id, pick_date).
#[derive(Default)]
pub struct MemoryStore {
    pub picks: Mutex<HashMap<(String, NaiveDate), DailyPick>>,
    pub garments: Vec<Garment>,
    next_id: AtomicUsize,
}

impl MemoryStore {
    #[allow(dead_code)]
    pub fn with_garments(garments: Vec<Garment>) -> Self {
        Self {
            garments,
            ..Default::default()
        }
    }

    #[allow(dead_code)]
    pub fn seed(&self, pick: DailyPick) {
        self.picks
            .lock()
            .unwrap()
            .insert((pick.user_id.clone(), pick.pick_date), pick);
    }

    #[allow(dead_code)]
    pub fn pick_count(&self) -> usize {
        self.picks.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn get(&self, user_id: &str, date: NaiveDate) -> Option<DailyPick> {
        self.picks
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), date))
            .cloned()
    }
}

#[async_trait]
impl PickStore for MemoryStore {
    async fn get_pick(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyPick>, AppError> {
        Ok(self.get(user_id, date))
    }

    async fn upsert_pick(&self, pick: &DailyPick) -> Result<DailyPick, AppError> {
        let mut stored = pick.clone();
        if stored.id.is_none() {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            stored.id = Some(format!("pick-{}", n));
        }
        self.picks
            .lock()
            .unwrap()
            .insert((stored.user_id.clone(), stored.pick_date), stored.clone());
        Ok(stored)
    }

    async fn delete_pick(&self, user_id: &str, date: NaiveDate) -> Result<(), AppError> {
        self.picks
            .lock()
            .unwrap()
            .remove(&(user_id.to_string(), date));
        Ok(())
    }

    async fn set_pick_image(
        &self,
        user_id: &str,
        date: NaiveDate,
        image_url: &str,
    ) -> Result<(), AppError> {
        let mut picks = self.picks.lock().unwrap();
        let pick = picks
            .get_mut(&(user_id.to_string(), date))
            .ok_or_else(|| AppError::NotFound(format!("No pick for {}", date)))?;
        pick.image_url = Some(image_url.to_string());
        Ok(())
    }

    async fn update_pick_flags(
        &self,
        user_id: &str,
        date: NaiveDate,
        is_liked: Option<bool>,
        was_logged: Option<bool>,
    ) -> Result<DailyPick, AppError> {
        let mut picks = self.picks.lock().unwrap();
        let pick = picks
            .get_mut(&(user_id.to_string(), date))
            .ok_or_else(|| AppError::NotFound(format!("No pick for {}", date)))?;
        if let Some(liked) = is_liked {
            pick.is_liked = liked;
        }
        if let Some(logged) = was_logged {
            pick.was_logged = logged;
        }
        Ok(pick.clone())
    }

    async fn list_garments(&self, user_id: &str) -> Result<Vec<Garment>, AppError> {
        Ok(self
            .garments
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// Weather provider that succeeds and counts its calls.
#[derive(Default)]
pub struct CountingWeather {
    pub calls: AtomicUsize,
}

#[async_trait]
impl WeatherProvider for CountingWeather {
    async fn fetch(&self, coords: Coordinates) -> Result<WeatherReading, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(WeatherReading {
            latitude: Some(coords.latitude),
            longitude: Some(coords.longitude),
            temperature: 21.0,
            description: "Clear sky".to_string(),
            uv_index: 4.2,
            temp_min: Some(16.0),
            temp_max: Some(24.0),
        })
    }
}

/// Weather provider that always fails.
pub struct FailingWeather;

#[async_trait]
impl WeatherProvider for FailingWeather {
    async fn fetch(&self, _coords: Coordinates) -> Result<WeatherReading, AppError> {
        Err(AppError::WeatherApi("provider down".to_string()))
    }
}

/// Stylist returning a fixed two-item outfit: one item matching the
/// seeded closet garment (Nike Pegasus 41), one brandless item.
pub struct StaticStylist;

#[async_trait]
impl OutfitRecommender for StaticStylist {
    async fn recommend(
        &self,
        _weather: &WeatherReading,
        _inventory: &[Garment],
    ) -> Result<OutfitCandidate, AppError> {
        Ok(OutfitCandidate {
            title: "Mild-day athleisure".to_string(),
            summary: "Comfortable layers for a clear 21°C day.".to_string(),
            hairstyle_note: Some("Low ponytail".to_string()),
            items: vec![
                CandidateItem {
                    category: "sneakers".to_string(),
                    name: "Daily runners".to_string(),
                    brand: Some("Nike".to_string()),
                    model: Some("Pegasus 41".to_string()),
                    color: Some("white".to_string()),
                    material: None,
                },
                CandidateItem {
                    category: "top".to_string(),
                    name: "Linen overshirt".to_string(),
                    brand: None,
                    model: None,
                    color: Some("beige".to_string()),
                    material: Some("linen".to_string()),
                },
            ],
        })
    }
}

/// Stylist that always fails (service unavailable).
pub struct FailingStylist;

#[async_trait]
impl OutfitRecommender for FailingStylist {
    async fn recommend(
        &self,
        _weather: &WeatherReading,
        _inventory: &[Garment],
    ) -> Result<OutfitCandidate, AppError> {
        Err(AppError::Internal(anyhow::anyhow!("stylist down")))
    }
}

/// Image synthesizer returning a fixed URL, or failing when `None`.
pub struct StaticImage(pub Option<&'static str>);

#[async_trait]
impl ImageSynthesizer for StaticImage {
    async fn synthesize(&self, _outfit: &OutfitCandidate) -> Result<String, AppError> {
        match self.0 {
            Some(url) => Ok(url.to_string()),
            None => Err(AppError::Internal(anyhow::anyhow!("image service down"))),
        }
    }
}

/// Lookup that never finds anything.
pub struct NoLookup;

#[async_trait]
impl ProductImageLookup for NoLookup {
    async fn find(&self, _brand: &str, _model: &str) -> Result<Option<String>, AppError> {
        Ok(None)
    }
}

/// Geolocation source returning fixed coordinates.
#[allow(dead_code)]
pub struct FixedGeo(pub Coordinates);

#[async_trait]
impl GeolocationSource for FixedGeo {
    async fn current(&self) -> Result<Coordinates, AppError> {
        Ok(self.0)
    }
}

/// Geolocation source that always fails.
pub struct FailingGeo;

#[async_trait]
impl GeolocationSource for FailingGeo {
    async fn current(&self) -> Result<Coordinates, AppError> {
        Err(AppError::Internal(anyhow::anyhow!("location denied")))
    }
}

/// The closet garment the StaticStylist's first item matches.
#[allow(dead_code)]
pub fn closet_garment(user_id: &str) -> Garment {
    Garment {
        id: "g1".to_string(),
        user_id: user_id.to_string(),
        category: "shoes".to_string(),
        name: "Pegasus runners".to_string(),
        brand: Some("Nike".to_string()),
        model: Some("Pegasus 41".to_string()),
        color: Some("black".to_string()),
        material: Some("mesh".to_string()),
        image_url: Some("https://closet/pegasus.jpg".to_string()),
    }
}

/// A pre-existing pick with a weather snapshot at the given coordinates
/// (or without one when `None`).
#[allow(dead_code)]
pub fn seeded_pick(
    user_id: &str,
    date: NaiveDate,
    coords: Option<Coordinates>,
) -> DailyPick {
    DailyPick {
        id: Some("seeded".to_string()),
        user_id: user_id.to_string(),
        pick_date: date,
        title: "Seeded pick".to_string(),
        summary: "Pre-existing record".to_string(),
        hairstyle_note: None,
        items: vec![],
        weather: WeatherReading {
            latitude: coords.map(|c| c.latitude),
            longitude: coords.map(|c| c.longitude),
            temperature: 18.0,
            description: "Overcast".to_string(),
            uv_index: 2.0,
            temp_min: None,
            temp_max: None,
        },
        image_url: None,
        is_liked: false,
        was_logged: false,
        created_at: "2024-06-01T00:00:00Z".to_string(),
    }
}

pub const DEFAULT_LOCATION: Coordinates = Coordinates {
    latitude: 35.6764,
    longitude: 139.65,
};

/// Assemble a pick service over the given store and providers, with
/// no-op lookup and failing geolocation (callers normally pass coords).
#[allow(dead_code)]
pub fn build_service(
    store: Arc<MemoryStore>,
    weather: Arc<dyn WeatherProvider>,
    stylist: Arc<dyn OutfitRecommender>,
    image: Arc<dyn ImageSynthesizer>,
) -> DailyPickService {
    DailyPickService::new(
        store,
        weather,
        stylist,
        image,
        Arc::new(NoLookup),
        Arc::new(FailingGeo),
        DEFAULT_LOCATION,
    )
}

/// Create a test app with offline mock collaborators.
/// Returns the router and the backing store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<MemoryStore>, Vec<u8>) {
    let config = Config::test_default();
    let signing_key = config.backend_jwt_secret.clone();

    let store = Arc::new(MemoryStore::with_garments(vec![closet_garment("u1")]));
    let picks = build_service(
        Arc::clone(&store),
        Arc::new(CountingWeather::default()),
        Arc::new(StaticStylist),
        Arc::new(StaticImage(Some("https://img/outfit.png"))),
    );

    let state = Arc::new(AppState { config, picks });

    (
        chronowear::routes::create_router(state),
        store,
        signing_key,
    )
}
