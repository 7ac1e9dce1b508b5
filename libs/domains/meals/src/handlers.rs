use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::error::{MealError, MealResult};
use crate::models::{CreateMeal, Ingredient, Meal, MealListQuery, MealPage};
use crate::repository::MealRepository;
use crate::service::MealService;

/// OpenAPI documentation for the Meals API
#[derive(OpenApi)]
#[openapi(
    paths(get_meal, create_meal, list_meals),
    components(
        schemas(Meal, Ingredient, CreateMeal, MealPage),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Meals", description = "Meal catalog endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the meals router with all HTTP endpoints
///
/// Paths are part of the public contract the mobile client ships with, so
/// they keep their historical casing.
pub fn router<R: MealRepository + 'static>(service: MealService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/GetMeal", get(get_meal))
        .route("/meals", post(create_meal))
        .route("/GetPaginatedMeals", get(list_meals))
        .with_state(shared_service)
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetMealQuery {
    /// Meal id; may also be supplied in a JSON body
    pub id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
struct GetMealBody {
    id: Option<String>,
}

/// Fetch a single meal by id
///
/// The id may arrive as `?id=` or as `{"id": "..."}` in the body; the query
/// string wins when both are present.
#[utoipa::path(
    get,
    path = "/GetMeal",
    tag = "Meals",
    params(GetMealQuery),
    request_body(content = inline(GetMealBody), content_type = "application/json"),
    responses(
        (status = 200, description = "Meal found", body = Meal),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_meal<R: MealRepository>(
    State(service): State<Arc<MealService<R>>>,
    Query(query): Query<GetMealQuery>,
    body: Bytes,
) -> MealResult<Json<Meal>> {
    let id = query.id.or_else(|| {
        serde_json::from_slice::<GetMealBody>(&body)
            .ok()
            .and_then(|b| b.id)
    });
    let id = id.ok_or(MealError::MissingId)?;

    let meal = service.get_meal(&id).await?;
    Ok(Json(meal))
}

/// Create a new meal
#[utoipa::path(
    post,
    path = "/meals",
    tag = "Meals",
    request_body = CreateMeal,
    responses(
        (status = 201, description = "Meal created successfully", body = Meal),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_meal<R: MealRepository>(
    State(service): State<Arc<MealService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateMeal>,
) -> MealResult<impl IntoResponse> {
    let meal = service.create_meal(input).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// List meals, newest first, with continuation-token pagination
#[utoipa::path(
    get,
    path = "/GetPaginatedMeals",
    tag = "Meals",
    params(MealListQuery),
    responses(
        (status = 200, description = "One page of meals", body = MealPage),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_meals<R: MealRepository>(
    State(service): State<Arc<MealService<R>>>,
    Query(query): Query<MealListQuery>,
) -> MealResult<Json<MealPage>> {
    let page = service.list_meals(query).await?;
    Ok(Json(page))
}
