//! Import API routes
//!
//! Wires the import domain to HTTP routes: the recipe provider, the image
//! pipeline (when blob storage is configured), and the shared meal
//! repository.

use axum::Router;
use domain_import::{AzureBlobStore, HttpImageFetcher, ImportService, SpoonacularClient, handlers};
use domain_meals::MongoMealRepository;
use std::sync::Arc;

use crate::state::AppState;

/// Create import router
pub fn router(state: &AppState) -> Router {
    let repository = Arc::new(MongoMealRepository::new(
        state.db.clone(),
        &state.config.meals_collection,
    ));
    let provider = Arc::new(SpoonacularClient::new(state.config.spoonacular.clone()));

    let mut service = ImportService::new(repository, provider);

    if let Some(ref blob) = state.config.blob {
        service = service.with_images(
            Arc::new(HttpImageFetcher::new()),
            Arc::new(AzureBlobStore::new(blob.clone())),
        );
    }

    handlers::router(service)
}
