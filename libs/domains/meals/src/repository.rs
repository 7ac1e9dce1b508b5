use async_trait::async_trait;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::MealResult;
use crate::models::Meal;

/// Parameters for a keyset-paginated listing.
#[derive(Debug, Clone, Default)]
pub struct MealPageRequest {
    /// Normalized category filter; `None` lists every category
    pub category: Option<String>,
    pub page_size: i64,
    /// Opaque cursor minted by a previous `list_page` call
    pub continuation_token: Option<String>,
}

/// Repository trait for Meal persistence
///
/// This trait defines the data access interface for meals.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Insert a new meal document
    async fn insert(&self, meal: &Meal) -> MealResult<()>;

    /// Find a meal by its id
    async fn find_by_id(&self, id: Uuid) -> MealResult<Option<Meal>>;

    /// Fetch one page, newest first, plus a continuation token when a
    /// further page exists
    async fn list_page(&self, request: MealPageRequest) -> MealResult<(Vec<Meal>, Option<String>)>;

    /// All meal names in the catalog (duplicate check during imports)
    async fn list_names(&self) -> MealResult<Vec<String>>;

    /// All distinct categories in the catalog
    async fn categories(&self) -> MealResult<Vec<String>>;

    /// Catalog-wide meal count per category
    async fn category_counts(&self) -> MealResult<BTreeMap<String, i64>>;
}
