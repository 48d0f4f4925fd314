//! HTTP surfaces for products
//!
//! Two routers expose the same service:
//! - [`controller`] at `/v1/product`
//! - [`functional`] at `/api/v2/products`

pub mod controller;
pub mod functional;
mod multipart;

use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub use controller::ControllerApiDoc;
pub use functional::FunctionalApiDoc;

/// Both surfaces over one shared service.
///
/// `upload_limit` bounds the request body of multipart routes, in bytes.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    upload_limit: usize,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .merge(controller::router(shared_service.clone(), upload_limit))
        .merge(functional::router(shared_service, upload_limit))
}

/// `{base_path}/{id}` for a saved product
fn location(base_path: &str, product: &Product) -> ProductResult<HeaderValue> {
    let id = product
        .id
        .as_deref()
        .ok_or_else(|| ProductError::Internal("saved product has no id".to_string()))?;

    HeaderValue::from_str(&format!("{}/{}", base_path, id))
        .map_err(|e| ProductError::Internal(format!("invalid location header: {}", e)))
}

/// 201 with a Location header pointing at `product`
fn created<T: Serialize>(base_path: &str, product: &Product, body: T) -> ProductResult<Response> {
    let location = location(base_path, product)?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(body),
    )
        .into_response())
}
