use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use thiserror::Error;

use crate::models::{ProductPayload, ValidationErrorBody};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {}", errors.join(", "))]
    ValidationFailed {
        product: ProductPayload,
        errors: Vec<String>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid JSON body: {0}")]
    Json(#[from] JsonRejection),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::ValidationFailed { errors, .. } => AppError::BadRequest(errors.join(", ")),
            ProductError::BadRequest(msg) => AppError::BadRequest(msg),
            ProductError::Json(e) => AppError::JsonExtractorRejection(e),
            ProductError::Multipart(e) => AppError::Multipart(e),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Storage(msg) => AppError::Storage(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(id) => {
                tracing::info!(product_id = %id, "Product not found");
                StatusCode::NOT_FOUND.into_response()
            }
            ProductError::ValidationFailed { product, errors } => {
                tracing::info!(?errors, "Product validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorBody { product, errors }),
                )
                    .into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<std::io::Error> for ProductError {
    fn from(err: std::io::Error) -> Self {
        ProductError::Storage(err.to_string())
    }
}
