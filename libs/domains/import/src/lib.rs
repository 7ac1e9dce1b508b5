//! Recipe Import Domain
//!
//! Bulk-imports recipes from an external recipe API into the meal catalog:
//! fetch a batch, skip duplicates by name, download and re-host images, and
//! record each recipe as a `Meal`. Individual recipe failures never abort
//! the batch.

pub mod error;
pub mod handlers;
pub mod media;
pub mod service;
pub mod spoonacular;

// Re-export commonly used types
pub use error::{ImportError, ImportResult};
pub use handlers::ApiDoc;
pub use media::{AzureBlobStore, BlobConfig, HttpImageFetcher, ImageFetcher, MediaStore};
pub use service::{ImportRequest, ImportService, ImportSummary, ImportedRecipe};
pub use spoonacular::{ExternalRecipe, RecipeProvider, SpoonacularClient, SpoonacularConfig};
