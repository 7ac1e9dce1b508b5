//! Handler tests for the Meals domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against an in-memory repository, so they test the handler and
//! service layers without a MongoDB instance.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use domain_meals::*;
use http_body_util::BodyExt;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

/// In-memory MealRepository with the same paging contract as the MongoDB
/// implementation; continuation tokens are plain offsets here.
#[derive(Default)]
struct InMemoryMealRepository {
    meals: Mutex<Vec<Meal>>,
}

#[async_trait]
impl MealRepository for InMemoryMealRepository {
    async fn insert(&self, meal: &Meal) -> MealResult<()> {
        self.meals.lock().unwrap().push(meal.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> MealResult<Option<Meal>> {
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn list_page(&self, request: MealPageRequest) -> MealResult<(Vec<Meal>, Option<String>)> {
        let mut meals: Vec<Meal> = self
            .meals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| match request.category {
                Some(ref c) => m.category.eq_ignore_ascii_case(c),
                None => true,
            })
            .cloned()
            .collect();
        meals.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        let offset: usize = match request.continuation_token {
            Some(ref token) => token.parse().map_err(|_| MealError::InvalidToken)?,
            None => 0,
        };
        let page_size = request.page_size.max(1) as usize;

        let page: Vec<Meal> = meals.iter().skip(offset).take(page_size).cloned().collect();
        let next = offset + page.len();
        let token = (next < meals.len()).then(|| next.to_string());

        Ok((page, token))
    }

    async fn list_names(&self) -> MealResult<Vec<String>> {
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.name.clone())
            .collect())
    }

    async fn categories(&self) -> MealResult<Vec<String>> {
        let mut categories: Vec<String> = self
            .meals
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn category_counts(&self) -> MealResult<BTreeMap<String, i64>> {
        let mut counts = BTreeMap::new();
        for meal in self.meals.lock().unwrap().iter() {
            *counts.entry(meal.category.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

fn make_service() -> MealService<InMemoryMealRepository> {
    MealService::new(InMemoryMealRepository::default())
}

fn sample_meal(name: &str, category: &str, minutes_ago: i64) -> Meal {
    Meal {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        ingredients: vec![],
        instructions: vec!["Cook".to_string()],
        cooking_time: 25,
        prep_time_minutes: 5,
        cook_time_minutes: 20,
        difficulty: Difficulty::Medium,
        servings: 2,
        category: category.to_string(),
        cuisine_type: "International".to_string(),
        tags: vec![],
        calories: None,
        rating: 0.0,
        review_count: 0,
        image_url: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
        is_favorite: false,
    }
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_create_meal_returns_201() {
    let app = handlers::router(make_service());

    let request = Request::builder()
        .method("POST")
        .uri("/meals")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Shakshuka",
                "ingredients": [{"name": "Egg", "amount": "4", "unit": "pieces"}],
                "instructions": ["Simmer sauce", "Crack eggs"],
                "cookingTime": 25,
                "servings": 2,
                "category": "Breakfast",
                "difficulty": "Easy"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let meal: Meal = json_body(response.into_body()).await;
    assert_eq!(meal.name, "Shakshuka");
    assert_eq!(meal.category, "Breakfast");
    assert_eq!(meal.rating, 0.0);
    assert!(!meal.is_favorite);
}

#[tokio::test]
async fn test_create_meal_400_names_missing_field() {
    let app = handlers::router(make_service());

    // everything but servings
    let request = Request::builder()
        .method("POST")
        .uri("/meals")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Shakshuka",
                "ingredients": [],
                "instructions": [],
                "cookingTime": 25,
                "category": "Breakfast",
                "difficulty": "Easy"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response.into_body()).await;
    assert!(body.contains("servings"));
}

#[tokio::test]
async fn test_create_meal_validates_name_length() {
    let app = handlers::router(make_service());

    let request = Request::builder()
        .method("POST")
        .uri("/meals")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "",
                "ingredients": [],
                "instructions": [],
                "cookingTime": 25,
                "servings": 2,
                "category": "Breakfast",
                "difficulty": "Easy"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_meal_malformed_json_returns_400() {
    let app = handlers::router(make_service());

    let request = Request::builder()
        .method("POST")
        .uri("/meals")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_meal_mistyped_field_returns_400() {
    let app = handlers::router(make_service());

    // syntactically valid JSON that does not fit the schema must still be
    // a 400, not axum's default 422
    let request = Request::builder()
        .method("POST")
        .uri("/meals")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "Shakshuka",
                "ingredients": [],
                "instructions": [],
                "cookingTime": 25,
                "servings": "two",
                "category": "Breakfast",
                "difficulty": "Easy"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_meal_without_id_returns_400() {
    let app = handlers::router(make_service());

    let request = Request::builder()
        .method("GET")
        .uri("/GetMeal")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response.into_body()).await;
    assert!(body.contains("Please pass a meal id in the query string or request body"));
}

#[tokio::test]
async fn test_get_meal_unknown_id_returns_404() {
    let app = handlers::router(make_service());
    let missing = Uuid::new_v4();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/GetMeal?id={}", missing))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_string(response.into_body()).await;
    assert!(body.contains(&format!("Meal not found with id: {}", missing)));
}

#[tokio::test]
async fn test_get_meal_by_query_returns_200() {
    let service = make_service();
    let repo = service.repository();
    let meal = sample_meal("Ramen", "Soup", 0);
    repo.insert(&meal).await.unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/GetMeal?id={}", meal.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found: Meal = json_body(response.into_body()).await;
    assert_eq!(found.id, meal.id);
    assert_eq!(found.name, "Ramen");
}

#[tokio::test]
async fn test_get_meal_by_body_returns_200() {
    let service = make_service();
    let repo = service.repository();
    let meal = sample_meal("Pho", "Soup", 0);
    repo.insert(&meal).await.unwrap();

    let app = handlers::router(service);

    let request = Request::builder()
        .method("GET")
        .uri("/GetMeal")
        .header("content-type", "application/json")
        .body(Body::from(format!(r#"{{"id": "{}"}}"#, meal.id)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let found: Meal = json_body(response.into_body()).await;
    assert_eq!(found.id, meal.id);
}

#[tokio::test]
async fn test_paginated_meals_default_page_size_and_token() {
    let service = make_service();
    let repo = service.repository();
    for i in 0..20 {
        repo.insert(&sample_meal(&format!("Meal {}", i), "Dinner", i))
            .await
            .unwrap();
    }

    let app = handlers::router(service);

    // First page: 15 items, token present
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/GetPaginatedMeals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: MealPage = json_body(response.into_body()).await;
    assert_eq!(page.items.len(), 15);
    // newest first
    assert_eq!(page.items[0].name, "Meal 0");
    let token = page.continuation_token.expect("token on a non-final page");

    // Second page: remaining 5, no token
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/GetPaginatedMeals?continuationToken={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: MealPage = json_body(response.into_body()).await;
    assert_eq!(page.items.len(), 5);
    assert!(page.continuation_token.is_none());
}

#[tokio::test]
async fn test_paginated_meals_category_filter_is_case_insensitive() {
    let service = make_service();
    let repo = service.repository();
    repo.insert(&sample_meal("Cake", "Dessert", 1)).await.unwrap();
    repo.insert(&sample_meal("Pie", "Dessert", 2)).await.unwrap();
    repo.insert(&sample_meal("Stew", "Dinner", 3)).await.unwrap();

    let app = handlers::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/GetPaginatedMeals?category=dessert")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: MealPage = json_body(response.into_body()).await;
    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(|m| m.category == "Dessert"));

    // category metadata stays catalog-wide
    assert_eq!(page.categories, vec!["Dessert", "Dinner"]);
    assert_eq!(page.category_counts.get("Dessert"), Some(&2));
    assert_eq!(page.category_counts.get("Dinner"), Some(&1));
}

#[tokio::test]
async fn test_paginated_meals_backfills_calories_from_description() {
    let service = make_service();
    let repo = service.repository();
    let mut meal = sample_meal("Burger", "Dinner", 0);
    meal.description = "A classic, roughly 850 calories".to_string();
    repo.insert(&meal).await.unwrap();

    let app = handlers::router(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/GetPaginatedMeals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let page: MealPage = json_body(response.into_body()).await;
    assert_eq!(page.items[0].calories, Some(850));
}

#[tokio::test]
async fn test_paginated_meals_bad_token_returns_400() {
    let app = handlers::router(make_service());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/GetPaginatedMeals?continuationToken=broken")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
