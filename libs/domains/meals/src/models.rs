use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Cooking difficulty, derived from total cooking time when not supplied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Tier a recipe by total minutes: up to 20 is Easy, up to 45 is Medium.
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes <= 20 {
            Difficulty::Easy
        } else if minutes <= 45 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

/// A single recipe ingredient with a free-text amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// Fixed-width RFC-3339 serialization for `createdAt`.
///
/// The listing sort and the keyset cursor compare these values as strings,
/// so every stored document must carry the same fractional width. Chrono's
/// default serde drops trailing zeros (0, 3, 6, or 9 digits), and mixed
/// widths make string order disagree with chronological order within a
/// second.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Render a timestamp exactly as it is stored: millisecond precision,
    /// `Z` suffix, never a truncated fraction.
    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

/// Meal entity stored in MongoDB.
///
/// The wire format is camelCase, matching the documents the mobile client
/// already consumes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Unique identifier (UUID string)
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    /// Step-by-step instructions
    pub instructions: Vec<String>,
    /// Total cooking time in minutes
    pub cooking_time: i64,
    #[serde(default)]
    pub prep_time_minutes: i64,
    #[serde(default)]
    pub cook_time_minutes: i64,
    pub difficulty: Difficulty,
    pub servings: i64,
    /// Logical partition key of the catalog
    pub category: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Nullable; backfilled from the description at read time when absent
    pub calories: Option<i64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i64,
    pub image_url: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
}

/// DTO for creating a new meal.
///
/// Required fields are Option-typed so the service can reject each missing
/// one with a 400 naming the field, instead of a generic deserialize error.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeal {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    pub cooking_time: Option<i64>,
    pub prep_time_minutes: Option<i64>,
    pub cook_time_minutes: Option<i64>,
    pub difficulty: Option<Difficulty>,
    #[validate(range(min = 1))]
    pub servings: Option<i64>,
    pub category: Option<String>,
    pub cuisine_type: Option<String>,
    pub tags: Option<Vec<String>>,
    #[validate(range(min = 0))]
    pub calories: Option<i64>,
    pub image_url: Option<String>,
    pub is_favorite: Option<bool>,
}

/// Query parameters for paginated listing.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MealListQuery {
    /// Page size (default 15)
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Opaque cursor from a previous page
    pub continuation_token: Option<String>,
    /// Category filter; "all" (or empty) disables filtering
    pub category: Option<String>,
}

impl Default for MealListQuery {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            continuation_token: None,
            category: None,
        }
    }
}

fn default_page_size() -> i64 {
    15
}

/// One page of meals plus catalog-wide category metadata.
///
/// `continuation_token` is present exactly when a further page exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealPage {
    pub items: Vec<Meal>,
    /// All distinct categories in the catalog, regardless of filter
    pub categories: Vec<String>,
    /// Catalog-wide meal count per category, regardless of filter
    pub category_counts: BTreeMap<String, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}
