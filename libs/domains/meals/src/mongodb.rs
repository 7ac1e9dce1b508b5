//! MongoDB implementation of MealRepository

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{MealError, MealResult};
use crate::models::Meal;
use crate::repository::{MealPageRequest, MealRepository};

/// Keyset cursor for resuming a listing.
///
/// Serialized as base64url JSON so it stays an opaque string to clients.
/// `created_at` carries the stored fixed-width timestamp string, so the
/// `$lt` comparison always runs against values produced by the same
/// serializer (see `models::timestamp`).
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PageToken {
    created_at: String,
    id: Uuid,
}

impl PageToken {
    fn encode(&self) -> MealResult<String> {
        let json = serde_json::to_vec(self).map_err(|e| MealError::Database(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    fn decode(token: &str) -> MealResult<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| MealError::InvalidToken)?;
        serde_json::from_slice(&bytes).map_err(|_| MealError::InvalidToken)
    }
}

/// MongoDB implementation of the MealRepository
pub struct MongoMealRepository {
    collection: Collection<Meal>,
}

impl MongoMealRepository {
    /// Create a new MongoMealRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("cookmate");
    /// let repo = MongoMealRepository::new(db, "meals");
    /// ```
    pub fn new(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Meal>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Meal> {
        &self.collection
    }

    /// Provision the indexes the listing and lookup paths rely on.
    ///
    /// Called once at startup; MongoDB treats re-creation as a no-op.
    pub async fn ensure_indexes(&self) -> MealResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            IndexModel::builder().keys(doc! { "category": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Meal indexes provisioned");
        Ok(())
    }

    /// Build the find filter for a page request.
    fn build_filter(request: &MealPageRequest) -> MealResult<Document> {
        let mut filter = doc! {};

        if let Some(ref category) = request.category {
            // Anchored, case-insensitive exact match on the category
            filter.insert(
                "category",
                doc! { "$regex": format!("^{}$", regex::escape(category)), "$options": "i" },
            );
        }

        if let Some(ref token) = request.continuation_token {
            let cursor = PageToken::decode(token)?;
            // Resume strictly after the last item of the previous page under
            // the (createdAt desc, id desc) sort
            filter.insert(
                "$or",
                vec![
                    doc! { "createdAt": { "$lt": &cursor.created_at } },
                    doc! {
                        "createdAt": &cursor.created_at,
                        "id": { "$lt": cursor.id.to_string() },
                    },
                ],
            );
        }

        Ok(filter)
    }
}

#[async_trait]
impl MealRepository for MongoMealRepository {
    #[instrument(skip(self, meal), fields(meal_id = %meal.id, meal_name = %meal.name))]
    async fn insert(&self, meal: &Meal) -> MealResult<()> {
        self.collection.insert_one(meal).await?;

        tracing::info!("Meal created successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> MealResult<Option<Meal>> {
        let filter = doc! { "id": id.to_string() };
        let meal = self.collection.find_one(filter).await?;
        Ok(meal)
    }

    #[instrument(skip(self))]
    async fn list_page(&self, request: MealPageRequest) -> MealResult<(Vec<Meal>, Option<String>)> {
        use futures_util::TryStreamExt;

        let filter = Self::build_filter(&request)?;
        let page_size = request.page_size.max(1);

        // Fetch one extra document to learn whether a further page exists
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "createdAt": -1, "id": -1 })
            .limit(page_size + 1)
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let mut meals: Vec<Meal> = cursor.try_collect().await?;

        let next_token = if meals.len() as i64 > page_size {
            meals.truncate(page_size as usize);
            let last = meals.last().ok_or_else(|| {
                MealError::Database("page unexpectedly empty after truncation".to_string())
            })?;
            Some(
                PageToken {
                    created_at: crate::models::timestamp::format(&last.created_at),
                    id: last.id,
                }
                .encode()?,
            )
        } else {
            None
        };

        Ok((meals, next_token))
    }

    #[instrument(skip(self))]
    async fn list_names(&self) -> MealResult<Vec<String>> {
        use futures_util::TryStreamExt;

        let options = mongodb::options::FindOptions::builder()
            .projection(doc! { "name": 1, "_id": 0 })
            .build();

        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! {})
            .with_options(options)
            .await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        Ok(docs
            .into_iter()
            .filter_map(|d| d.get_str("name").ok().map(String::from))
            .collect())
    }

    #[instrument(skip(self))]
    async fn categories(&self) -> MealResult<Vec<String>> {
        let values = self.collection.distinct("category", doc! {}).await?;

        let mut categories: Vec<String> = values
            .into_iter()
            .filter_map(|v| match v {
                Bson::String(s) => Some(s),
                _ => None,
            })
            .collect();
        categories.sort();

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn category_counts(&self) -> MealResult<BTreeMap<String, i64>> {
        use futures_util::TryStreamExt;

        let pipeline = vec![doc! {
            "$group": { "_id": "$category", "count": { "$sum": 1 } }
        }];

        let cursor = self.collection.aggregate(pipeline).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        let mut counts = BTreeMap::new();
        for d in docs {
            if let (Ok(category), Ok(count)) = (d.get_str("_id"), d.get_i32("count")) {
                counts.insert(category.to_string(), i64::from(count));
            } else if let (Ok(category), Ok(count)) = (d.get_str("_id"), d.get_i64("count")) {
                counts.insert(category.to_string(), count);
            }
        }

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MealPageRequest;

    #[test]
    fn test_page_token_round_trip() {
        let token = PageToken {
            created_at: "2026-08-30T12:00:00.123456789Z".to_string(),
            id: Uuid::new_v4(),
        };

        let encoded = token.encode().unwrap();
        // opaque: no raw JSON visible, URL-safe alphabet
        assert!(!encoded.contains('{'));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));

        let decoded = PageToken::decode(&encoded).unwrap();
        assert_eq!(decoded, token);
    }

    #[test]
    fn test_page_token_decode_rejects_garbage() {
        assert!(matches!(
            PageToken::decode("not a token!"),
            Err(MealError::InvalidToken)
        ));
        // valid base64url but not our JSON shape
        let bogus = URL_SAFE_NO_PAD.encode(b"[1,2,3]");
        assert!(matches!(
            PageToken::decode(&bogus),
            Err(MealError::InvalidToken)
        ));
    }

    #[test]
    fn test_build_filter_empty() {
        let filter = MongoMealRepository::build_filter(&MealPageRequest::default()).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_build_filter_escapes_category() {
        let request = MealPageRequest {
            category: Some("Soups (cold)".to_string()),
            ..Default::default()
        };
        let filter = MongoMealRepository::build_filter(&request).unwrap();
        let regex = filter
            .get_document("category")
            .unwrap()
            .get_str("$regex")
            .unwrap();
        assert!(regex.starts_with('^'));
        assert!(regex.ends_with('$'));
        assert!(regex.contains(r"\("));
    }

    #[test]
    fn test_build_filter_bad_token_is_invalid() {
        let request = MealPageRequest {
            continuation_token: Some("###".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            MongoMealRepository::build_filter(&request),
            Err(MealError::InvalidToken)
        ));
    }
}
