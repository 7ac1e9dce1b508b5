//! MongoDB repository integration tests
//!
//! These need Docker for the MongoDB container, so they are ignored by
//! default. Run with `cargo test -- --ignored`.

use chrono::{Duration, TimeZone, Utc};
use domain_meals::*;
use test_utils::TestMongo;
use uuid::Uuid;

fn sample_meal(name: &str, category: &str, minutes_ago: i64) -> Meal {
    Meal {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        ingredients: vec![Ingredient {
            name: "Salt".to_string(),
            amount: "1".to_string(),
            unit: "tsp".to_string(),
        }],
        instructions: vec!["Mix".to_string()],
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

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_and_find_round_trip() {
    let mongo = TestMongo::new().await;
    let repo = MongoMealRepository::new(mongo.database("cookmate_test"), "meals");
    repo.ensure_indexes().await.unwrap();

    let meal = sample_meal("Goulash", "Dinner", 0);
    repo.insert(&meal).await.unwrap();

    let found = repo.find_by_id(meal.id).await.unwrap().unwrap();
    assert_eq!(found.id, meal.id);
    assert_eq!(found.name, "Goulash");
    assert_eq!(found.ingredients.len(), 1);

    let missing = repo.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_page_walks_all_pages_without_overlap() {
    let mongo = TestMongo::new().await;
    let repo = MongoMealRepository::new(mongo.database("cookmate_test"), "meals_paging");
    repo.ensure_indexes().await.unwrap();

    for i in 0..12 {
        repo.insert(&sample_meal(&format!("Meal {}", i), "Dinner", i))
            .await
            .unwrap();
    }

    let mut seen = Vec::new();
    let mut token = None;
    let mut pages = 0;

    loop {
        let (items, next) = repo
            .list_page(MealPageRequest {
                category: None,
                page_size: 5,
                continuation_token: token.clone(),
            })
            .await
            .unwrap();

        pages += 1;
        seen.extend(items.iter().map(|m| m.name.clone()));

        match next {
            Some(next_token) => token = Some(next_token),
            None => break,
        }
    }

    assert_eq!(pages, 3); // 5 + 5 + 2
    assert_eq!(seen.len(), 12);
    // newest first across the whole walk, no duplicates
    let expected: Vec<String> = (0..12).map(|i| format!("Meal {}", i)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_page_orders_same_second_timestamps_correctly() {
    let mongo = TestMongo::new().await;
    let repo = MongoMealRepository::new(mongo.database("cookmate_test"), "meals_subsecond");
    repo.ensure_indexes().await.unwrap();

    // All inside one second, with sub-second offsets that a trailing-zero
    // trimming serializer would render at different fractional widths,
    // inverting the string sort
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 20).unwrap();
    let offsets = [
        ("Meal 0", Duration::milliseconds(900)),
        ("Meal 1", Duration::microseconds(123_456)),
        ("Meal 2", Duration::milliseconds(100)),
        ("Meal 3", Duration::zero()),
    ];
    for (name, offset) in offsets {
        let mut meal = sample_meal(name, "Dinner", 0);
        meal.created_at = base + offset;
        repo.insert(&meal).await.unwrap();
    }

    let (first, token) = repo
        .list_page(MealPageRequest {
            category: None,
            page_size: 2,
            continuation_token: None,
        })
        .await
        .unwrap();
    let token = token.expect("more pages remain");

    let (second, token) = repo
        .list_page(MealPageRequest {
            category: None,
            page_size: 2,
            continuation_token: Some(token),
        })
        .await
        .unwrap();
    assert!(token.is_none());

    // newest first across the page boundary, nothing skipped or repeated
    let names: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["Meal 0", "Meal 1", "Meal 2", "Meal 3"]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_exact_multiple_of_page_size_has_no_trailing_token() {
    let mongo = TestMongo::new().await;
    let repo = MongoMealRepository::new(mongo.database("cookmate_test"), "meals_exact");
    repo.ensure_indexes().await.unwrap();

    for i in 0..10 {
        repo.insert(&sample_meal(&format!("Meal {}", i), "Dinner", i))
            .await
            .unwrap();
    }

    let (first, token) = repo
        .list_page(MealPageRequest {
            category: None,
            page_size: 5,
            continuation_token: None,
        })
        .await
        .unwrap();
    assert_eq!(first.len(), 5);
    let token = token.expect("more pages remain");

    let (second, token) = repo
        .list_page(MealPageRequest {
            category: None,
            page_size: 5,
            continuation_token: Some(token),
        })
        .await
        .unwrap();
    assert_eq!(second.len(), 5);
    // the catalog is exhausted even though the last page was full
    assert!(token.is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_category_filter_and_counts() {
    let mongo = TestMongo::new().await;
    let repo = MongoMealRepository::new(mongo.database("cookmate_test"), "meals_categories");
    repo.ensure_indexes().await.unwrap();

    repo.insert(&sample_meal("Cake", "Dessert", 1)).await.unwrap();
    repo.insert(&sample_meal("Pie", "Dessert", 2)).await.unwrap();
    repo.insert(&sample_meal("Stew", "Dinner", 3)).await.unwrap();

    // case-insensitive exact match
    let (items, _) = repo
        .list_page(MealPageRequest {
            category: Some("dessert".to_string()),
            page_size: 10,
            continuation_token: None,
        })
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|m| m.category == "Dessert"));

    // a partial value must not match
    let (items, _) = repo
        .list_page(MealPageRequest {
            category: Some("Dess".to_string()),
            page_size: 10,
            continuation_token: None,
        })
        .await
        .unwrap();
    assert!(items.is_empty());

    let categories = repo.categories().await.unwrap();
    assert_eq!(categories, vec!["Dessert", "Dinner"]);

    let counts = repo.category_counts().await.unwrap();
    assert_eq!(counts.get("Dessert"), Some(&2));
    assert_eq!(counts.get("Dinner"), Some(&1));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_names() {
    let mongo = TestMongo::new().await;
    let repo = MongoMealRepository::new(mongo.database("cookmate_test"), "meals_names");

    repo.insert(&sample_meal("Cake", "Dessert", 1)).await.unwrap();
    repo.insert(&sample_meal("Stew", "Dinner", 2)).await.unwrap();

    let mut names = repo.list_names().await.unwrap();
    names.sort();
    assert_eq!(names, vec!["Cake", "Stew"]);
}
