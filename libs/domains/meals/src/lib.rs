//! Meals Domain
//!
//! Domain implementation for the meal catalog backed by MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_meals::{
//!     handlers,
//!     mongodb::MongoMealRepository,
//!     service::MealService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("cookmate");
//!
//! let repository = MongoMealRepository::new(db, "meals");
//! let service = MealService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod calories;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use calories::extract_calories;
pub use error::{MealError, MealResult};
pub use handlers::ApiDoc;
pub use models::{CreateMeal, Difficulty, Ingredient, Meal, MealListQuery, MealPage};
pub use mongodb::MongoMealRepository;
pub use repository::{MealPageRequest, MealRepository};
pub use service::MealService;
