//! Spoonacular recipe provider
//!
//! Fetches random recipes from the Spoonacular API.
//! https://spoonacular.com/food-api/docs#Get-Random-Recipes

use async_trait::async_trait;
use core_config::{ConfigError, FromEnv, env_optional};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ImportError, ImportResult};

/// Default Spoonacular API endpoint
const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

/// Per-call timeout for recipe fetches
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Spoonacular API configuration
///
/// The API key is optional at startup; an import attempt without one fails
/// with a configuration error instead of crashing the process.
#[derive(Clone, Debug)]
pub struct SpoonacularConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Load SpoonacularConfig from environment variables
///
/// Environment variables:
/// - `SPOONACULAR_API_KEY` (optional) - API key; imports fail without it
/// - `SPOONACULAR_BASE_URL` (optional, default: "https://api.spoonacular.com")
impl FromEnv for SpoonacularConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: env_optional("SPOONACULAR_API_KEY"),
            base_url: env_optional("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Trait for recipe providers
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Fetch a batch of random recipes with nutrition data
    async fn fetch_random(&self, count: u32) -> ImportResult<Vec<ExternalRecipe>>;
}

/// Spoonacular implementation of RecipeProvider
pub struct SpoonacularClient {
    config: SpoonacularConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct RandomRecipesResponse {
    #[serde(default)]
    recipes: Vec<ExternalRecipe>,
}

/// One recipe as the external API describes it.
///
/// Every field is optional or defaulted; upstream data is uneven and a
/// single malformed recipe must not fail the batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalRecipe {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    #[serde(rename = "readyInMinutes")]
    pub ready_in_minutes: Option<i64>,
    #[serde(rename = "preparationMinutes")]
    pub preparation_minutes: Option<i64>,
    #[serde(rename = "cookingMinutes")]
    pub cooking_minutes: Option<i64>,
    pub servings: Option<i64>,
    #[serde(rename = "spoonacularScore")]
    pub spoonacular_score: Option<f64>,
    #[serde(rename = "aggregateLikes")]
    pub aggregate_likes: Option<i64>,
    #[serde(rename = "dishTypes", default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    pub instructions: Option<String>,
    #[serde(rename = "analyzedInstructions", default)]
    pub analyzed_instructions: Vec<AnalyzedInstructions>,
    #[serde(rename = "extendedIngredients", default)]
    pub extended_ingredients: Vec<ExternalIngredient>,
    pub nutrition: Option<Nutrition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzedInstructions {
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstructionStep {
    pub step: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalIngredient {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nutrient {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn fetch_random(&self, count: u32) -> ImportResult<Vec<ExternalRecipe>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ImportError::MissingApiKey)?;

        info!(count = count, "Fetching random recipes");

        let url = format!(
            "{}/recipes/random?number={}&includeNutrition=true&apiKey={}",
            self.config.base_url,
            count,
            urlencoding::encode(api_key)
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ImportError::Api(format!(
                "Recipe API returned status: {}",
                response.status()
            )));
        }

        let data: RandomRecipesResponse = response
            .json()
            .await
            .map_err(|e| ImportError::Parse(e.to_string()))?;

        debug!(recipes = data.recipes.len(), "Recipe batch received");
        Ok(data.recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_external_recipe() {
        let json = r#"{
            "recipes": [{
                "title": "Garlic Butter Pasta",
                "summary": "Rich and quick, about 540 calories per plate.",
                "image": "https://img.example.com/123.jpg",
                "readyInMinutes": 25,
                "preparationMinutes": 10,
                "cookingMinutes": 15,
                "servings": 2,
                "spoonacularScore": 86.0,
                "aggregateLikes": 412,
                "dishTypes": ["main course", "dinner"],
                "diets": ["vegetarian"],
                "cuisines": ["Italian"],
                "instructions": "Boil. Toss. Serve.",
                "analyzedInstructions": [{"steps": [{"step": "Boil pasta."}, {"step": "Toss in butter."}]}],
                "extendedIngredients": [{"name": "spaghetti", "amount": 200.0, "unit": "g"}],
                "nutrition": {"nutrients": [{"name": "Calories", "amount": 540.2, "unit": "kcal"}]}
            }]
        }"#;

        let response: RandomRecipesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.recipes.len(), 1);

        let recipe = &response.recipes[0];
        assert_eq!(recipe.title.as_deref(), Some("Garlic Butter Pasta"));
        assert_eq!(recipe.ready_in_minutes, Some(25));
        assert_eq!(recipe.spoonacular_score, Some(86.0));
        assert_eq!(recipe.analyzed_instructions[0].steps.len(), 2);
        assert_eq!(
            recipe.nutrition.as_ref().unwrap().nutrients[0].amount,
            Some(540.2)
        );
    }

    #[test]
    fn test_deserializes_sparse_recipe() {
        // upstream data is uneven; everything except the envelope is optional
        let response: RandomRecipesResponse =
            serde_json::from_str(r#"{"recipes": [{"title": "Mystery Dish"}]}"#).unwrap();
        let recipe = &response.recipes[0];
        assert!(recipe.summary.is_none());
        assert!(recipe.dish_types.is_empty());
        assert!(recipe.nutrition.is_none());
    }

    #[test]
    fn test_config_defaults() {
        let config = SpoonacularConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://api.spoonacular.com");
    }
}
