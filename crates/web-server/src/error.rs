use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Database(DbError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(DbError::Integrity(_)) => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            AppError::Database(DbError::Validation(err)) => err.to_string(),
            AppError::Database(db_err @ DbError::Integrity(_)) => {
                tracing::warn!(error = %db_err, "Write rejected by a store constraint.");
                db_err.to_string()
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                "An internal database error occurred".to_string()
            }
            AppError::NotFound(message) => message,
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
