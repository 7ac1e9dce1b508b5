//! Meal Service - Business logic layer

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::calories::extract_calories;
use crate::error::{MealError, MealResult};
use crate::models::{CreateMeal, Meal, MealListQuery, MealPage};
use crate::repository::{MealPageRequest, MealRepository};

/// Category value that disables filtering
const ALL_CATEGORIES: &str = "all";

/// Meal service providing business logic operations
///
/// The service layer handles validation, business rules, and orchestrates
/// repository operations.
pub struct MealService<R: MealRepository> {
    repository: Arc<R>,
}

impl<R: MealRepository> MealService<R> {
    /// Create a new MealService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Share the underlying repository (the importer writes through it too)
    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    /// Create a new meal
    #[instrument(skip(self, input))]
    pub async fn create_meal(&self, input: CreateMeal) -> MealResult<Meal> {
        input
            .validate()
            .map_err(|e| MealError::Validation(e.to_string()))?;

        // Each missing required field gets its own 400 naming the field
        let name = input.name.ok_or(MealError::MissingField("name"))?;
        let ingredients = input
            .ingredients
            .ok_or(MealError::MissingField("ingredients"))?;
        let instructions = input
            .instructions
            .ok_or(MealError::MissingField("instructions"))?;
        let cooking_time = input
            .cooking_time
            .ok_or(MealError::MissingField("cookingTime"))?;
        let servings = input.servings.ok_or(MealError::MissingField("servings"))?;
        let category = input.category.ok_or(MealError::MissingField("category"))?;
        let difficulty = input
            .difficulty
            .ok_or(MealError::MissingField("difficulty"))?;

        let meal = Meal {
            id: Uuid::new_v4(),
            name,
            description: input.description.unwrap_or_default(),
            ingredients,
            instructions,
            cooking_time,
            prep_time_minutes: input.prep_time_minutes.unwrap_or(0),
            cook_time_minutes: input.cook_time_minutes.unwrap_or(0),
            difficulty,
            servings,
            category,
            cuisine_type: input
                .cuisine_type
                .unwrap_or_else(|| "International".to_string()),
            tags: input.tags.unwrap_or_default(),
            calories: input.calories,
            rating: 0.0,
            review_count: 0,
            image_url: input.image_url,
            created_at: Utc::now(),
            is_favorite: input.is_favorite.unwrap_or(false),
        };

        self.repository.insert(&meal).await?;
        Ok(meal)
    }

    /// Look up a meal by its id string
    ///
    /// A value that is not a UUID cannot match any document, so it reports
    /// not-found rather than bad-request.
    #[instrument(skip(self))]
    pub async fn get_meal(&self, id: &str) -> MealResult<Meal> {
        let Ok(uuid) = Uuid::parse_str(id) else {
            return Err(MealError::NotFound(id.to_string()));
        };

        self.repository
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| MealError::NotFound(id.to_string()))
    }

    /// List one page of meals, newest first, with category metadata
    #[instrument(skip(self))]
    pub async fn list_meals(&self, query: MealListQuery) -> MealResult<MealPage> {
        let category = query
            .category
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL_CATEGORIES));

        let request = MealPageRequest {
            category,
            page_size: query.page_size.max(1),
            continuation_token: query.continuation_token,
        };

        let (mut items, continuation_token) = self.repository.list_page(request).await?;

        // Backfill calories from the description at read time
        for meal in &mut items {
            if meal.calories.is_none() {
                meal.calories = extract_calories(&meal.description);
            }
        }

        // Category metadata is catalog-wide, independent of the filter
        let categories = self.repository.categories().await?;
        let category_counts = self.repository.category_counts().await?;

        Ok(MealPage {
            items,
            categories,
            category_counts,
            continuation_token,
        })
    }

}

impl<R: MealRepository> Clone for MealService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
