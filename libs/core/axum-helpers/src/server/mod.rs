//! Server infrastructure module.
//!
//! - Application setup with OpenAPI documentation
//! - Health endpoint
//! - Graceful shutdown coordination

pub mod app;
pub mod health;

pub use app::{create_app, create_production_app, create_router};
pub use health::{HealthResponse, health_router};
