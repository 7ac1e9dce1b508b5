use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_meals::MealError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Recipe API key is not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Recipe API error: {0}")]
    Api(String),

    #[error("No recipes returned by the recipe API")]
    EmptyResult,

    #[error("Media storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Meal(#[from] MealError),
}

pub type ImportResult<T> = Result<T, ImportError>;

/// Convert ImportError to AppError for standardized error responses
impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            // Configuration and upstream failures all surface as 500s; only
            // an empty upstream batch is a 404
            ImportError::MissingApiKey => {
                AppError::InternalServerError("Recipe API key is not configured".to_string())
            }
            ImportError::Http(e) => AppError::InternalServerError(e.to_string()),
            ImportError::Parse(msg) | ImportError::Api(msg) | ImportError::Storage(msg) => {
                AppError::InternalServerError(msg)
            }
            ImportError::EmptyResult => {
                AppError::NotFound("No recipes returned by the recipe API".to_string())
            }
            ImportError::Meal(e) => e.into(),
        }
    }
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
