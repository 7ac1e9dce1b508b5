//! API routes module
//!
//! This module defines all HTTP API routes for the CookMate API. Routes are
//! merged at the router root; the endpoint paths are a contract with the
//! mobile client and carry no prefix.

pub mod health;
pub mod import;
pub mod meals;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(meals::router(state))
        .merge(import::router(state))
        .merge(health::router(state.clone()))
}
