//! Meals API routes
//!
//! This module wires up the meals domain to HTTP routes.

use axum::Router;
use domain_meals::{MealService, MongoMealRepository, handlers};

use crate::state::AppState;

/// Create meals router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoMealRepository::new(state.db.clone(), &state.config.meals_collection);

    // Create the service
    let service = MealService::new(repository);

    // Return the domain's router
    handlers::router(service)
}
