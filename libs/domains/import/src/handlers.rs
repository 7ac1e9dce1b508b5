use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use axum_helpers::errors::responses::{InternalServerErrorResponse, NotFoundResponse};
use domain_meals::MealRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ImportResult;
use crate::service::{ImportRequest, ImportService, ImportSummary, ImportedRecipe};

/// OpenAPI documentation for the Import API
#[derive(OpenApi)]
#[openapi(
    paths(import_recipes),
    components(
        schemas(ImportRequest, ImportSummary, ImportedRecipe),
        responses(NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Import", description = "Bulk recipe import endpoints")
    )
)]
pub struct ApiDoc;

/// Create the import router
pub fn router<R: MealRepository + 'static>(service: ImportService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/ImportRecipes", post(import_recipes))
        .with_state(shared_service)
}

/// Import a batch of recipes from the external recipe API
///
/// The JSON body is optional; an absent or unreadable body imports the
/// default batch size.
#[utoipa::path(
    post,
    path = "/ImportRecipes",
    tag = "Import",
    request_body(content = ImportRequest, content_type = "application/json"),
    responses(
        (status = 200, description = "Import summary", body = ImportSummary),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn import_recipes<R: MealRepository>(
    State(service): State<Arc<ImportService<R>>>,
    body: Bytes,
) -> ImportResult<Json<ImportSummary>> {
    let request: ImportRequest = serde_json::from_slice(&body).unwrap_or_default();

    let summary = service.import(request).await?;
    Ok(Json(summary))
}
