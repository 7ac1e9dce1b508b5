use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Please pass a meal id in the query string or request body")]
    MissingId,

    #[error("Meal not found with id: {0}")]
    NotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid continuation token")]
    InvalidToken,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type MealResult<T> = Result<T, MealError>;

/// Convert MealError to AppError for standardized error responses
impl From<MealError> for AppError {
    fn from(err: MealError) -> Self {
        match err {
            MealError::MissingId => AppError::BadRequest(
                "Please pass a meal id in the query string or request body".to_string(),
            ),
            MealError::NotFound(id) => {
                AppError::NotFound(format!("Meal not found with id: {}", id))
            }
            MealError::MissingField(field) => {
                AppError::BadRequest(format!("Missing required field: {}", field))
            }
            MealError::InvalidToken => {
                AppError::BadRequest("Invalid continuation token".to_string())
            }
            MealError::Validation(msg) => AppError::BadRequest(msg),
            MealError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MealError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for MealError {
    fn from(err: mongodb::error::Error) -> Self {
        MealError::Database(err.to_string())
    }
}
