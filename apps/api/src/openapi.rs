//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Base document: info, servers, tags. Domain paths are merged in below
/// because they live at the router root, not under a prefix.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CookMate API",
        version = "0.1.0",
        description = "Recipe and meal-planning backend: meal catalog, pagination, and bulk recipe import",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    tags(
        (name = "Meals", description = "Meal catalog endpoints (MongoDB)"),
        (name = "Import", description = "Bulk recipe import endpoints")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_meals::ApiDoc::openapi());
        doc.merge(domain_import::ApiDoc::openapi());
        doc
    }
}
