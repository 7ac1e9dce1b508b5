//! Import Service - batch orchestration and recipe mapping

use chrono::Utc;
use domain_meals::{Difficulty, Ingredient, Meal, MealRepository};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ImportError, ImportResult};
use crate::media::{ImageFetcher, MediaStore};
use crate::spoonacular::{ExternalRecipe, RecipeProvider};

/// Batch size when the request does not specify one
const DEFAULT_IMPORT_COUNT: u32 = 50;

/// Hard cap per call, matching the upstream API's own limit
const MAX_IMPORT_COUNT: u32 = 50;

/// Request body for an import run
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ImportRequest {
    /// How many recipes to fetch (default 50, capped at 50)
    pub number: Option<u32>,
}

/// One successfully imported recipe
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportedRecipe {
    pub id: Uuid,
    pub name: String,
}

/// Outcome of an import run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub message: String,
    pub imported: usize,
    pub skipped: usize,
    pub recipes: Vec<ImportedRecipe>,
}

/// Image download/upload pair; absent when blob storage is unconfigured
struct ImagePipeline {
    fetcher: Arc<dyn ImageFetcher>,
    store: Arc<dyn MediaStore>,
}

/// Import service orchestrating a batch of external recipes into the catalog
pub struct ImportService<R: MealRepository> {
    repository: Arc<R>,
    provider: Arc<dyn RecipeProvider>,
    images: Option<ImagePipeline>,
}

impl<R: MealRepository> ImportService<R> {
    pub fn new(repository: Arc<R>, provider: Arc<dyn RecipeProvider>) -> Self {
        Self {
            repository,
            provider,
            images: None,
        }
    }

    /// Enable image re-hosting through the given fetcher and store
    pub fn with_images(
        mut self,
        fetcher: Arc<dyn ImageFetcher>,
        store: Arc<dyn MediaStore>,
    ) -> Self {
        self.images = Some(ImagePipeline { fetcher, store });
        self
    }

    /// Run one import batch
    ///
    /// Duplicates (against the catalog and within the batch) are skipped,
    /// and a failure on one recipe only skips that recipe.
    #[instrument(skip(self, request))]
    pub async fn import(&self, request: ImportRequest) -> ImportResult<ImportSummary> {
        let count = request
            .number
            .unwrap_or(DEFAULT_IMPORT_COUNT)
            .clamp(1, MAX_IMPORT_COUNT);

        let recipes = self.provider.fetch_random(count).await?;
        if recipes.is_empty() {
            return Err(ImportError::EmptyResult);
        }

        // One upfront name scan; updated in-memory so intra-batch duplicates
        // are caught too
        let mut known: HashSet<String> = self.repository.list_names().await?.into_iter().collect();

        let mut imported = Vec::new();
        let mut skipped = 0usize;

        for recipe in recipes {
            let Some(title) = recipe.title.clone().filter(|t| !t.is_empty()) else {
                warn!("Skipping recipe without a title");
                skipped += 1;
                continue;
            };

            if known.contains(&title) {
                info!(name = %title, "Skipping duplicate recipe");
                skipped += 1;
                continue;
            }

            match self.import_one(recipe).await {
                Ok(meal) => {
                    known.insert(title);
                    imported.push(ImportedRecipe {
                        id: meal.id,
                        name: meal.name,
                    });
                }
                Err(e) => {
                    warn!(name = %title, error = %e, "Failed to import recipe");
                    skipped += 1;
                }
            }
        }

        let summary = ImportSummary {
            message: format!(
                "Imported {} recipes, skipped {}",
                imported.len(),
                skipped
            ),
            imported: imported.len(),
            skipped,
            recipes: imported,
        };

        info!(imported = summary.imported, skipped = summary.skipped, "Import run finished");
        Ok(summary)
    }

    async fn import_one(&self, recipe: ExternalRecipe) -> ImportResult<Meal> {
        let image_url = self.resolve_image(recipe.image.as_deref()).await;
        let meal = build_meal(recipe, image_url);
        self.repository.insert(&meal).await?;
        Ok(meal)
    }

    /// Download and re-host a recipe image; any failure just drops the image
    async fn resolve_image(&self, source: Option<&str>) -> Option<String> {
        let pipeline = self.images.as_ref()?;
        let source = source?;

        let bytes = match pipeline.fetcher.fetch(source).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(url = source, error = %e, "Image download failed, importing without image");
                return None;
            }
        };

        let name = format!("{}.jpg", Uuid::new_v4());
        match pipeline.store.upload(&name, &bytes, "image/jpeg").await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(blob = %name, error = %e, "Image upload failed, importing without image");
                None
            }
        }
    }
}

/// Map an external recipe onto a catalog meal.
fn build_meal(recipe: ExternalRecipe, image_url: Option<String>) -> Meal {
    let cooking_time = recipe.ready_in_minutes.unwrap_or(30).max(0);

    // Prefer structured steps; fall back to the plain instructions string
    let steps: Vec<String> = recipe
        .analyzed_instructions
        .first()
        .map(|block| block.steps.iter().map(|s| s.step.clone()).collect())
        .unwrap_or_default();
    let instructions = if !steps.is_empty() {
        steps
    } else {
        recipe
            .instructions
            .filter(|i| !i.is_empty())
            .map(|i| vec![i])
            .unwrap_or_default()
    };

    let ingredients = recipe
        .extended_ingredients
        .into_iter()
        .map(|i| Ingredient {
            name: i.name.unwrap_or_default(),
            amount: i.amount.map(|a| a.to_string()).unwrap_or_default(),
            unit: i.unit.unwrap_or_default(),
        })
        .collect();

    // The first nutrient entry is the calorie figure
    let calories = recipe
        .nutrition
        .as_ref()
        .and_then(|n| n.nutrients.first())
        .and_then(|n| n.amount)
        .map(|a| a.round() as i64);

    let mut tags = recipe.dish_types.clone();
    tags.extend(recipe.diets);

    Meal {
        id: Uuid::new_v4(),
        name: recipe.title.unwrap_or_default(),
        description: recipe.summary.unwrap_or_default(),
        ingredients,
        instructions,
        cooking_time,
        prep_time_minutes: recipe.preparation_minutes.unwrap_or(0).max(0),
        cook_time_minutes: recipe.cooking_minutes.unwrap_or(0).max(0),
        difficulty: Difficulty::from_minutes(cooking_time),
        servings: recipe.servings.unwrap_or(1).max(1),
        category: recipe
            .dish_types
            .into_iter()
            .next()
            .unwrap_or_else(|| "Main Course".to_string()),
        cuisine_type: recipe
            .cuisines
            .into_iter()
            .next()
            .unwrap_or_else(|| "International".to_string()),
        tags,
        calories,
        // external score is 0-100; ours is 0-5
        rating: recipe.spoonacular_score.unwrap_or(0.0) / 20.0,
        review_count: recipe.aggregate_likes.unwrap_or(0),
        image_url,
        created_at: Utc::now(),
        is_favorite: false,
    }
}
