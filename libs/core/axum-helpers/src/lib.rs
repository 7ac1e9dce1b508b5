//! # Axum Helpers
//!
//! Utilities shared by the HTTP-facing crates:
//!
//! - **[`errors`]**: structured `{error, message, details}` error responses
//! - **[`extractors`]**: custom extractors (validated JSON)
//! - **[`server`]**: router/server setup, health endpoint, graceful shutdown
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!     create_app(router, &ServerConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod server;
pub mod shutdown;

pub use errors::{AppError, ErrorResponse};
pub use extractors::ValidatedJson;
pub use server::{
    HealthResponse, create_app, create_production_app, create_router, health_router,
};
pub use shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
