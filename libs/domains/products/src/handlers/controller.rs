//! Products endpoints under `/v1/product`

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadRequestResponse, InternalServerErrorResponse, PayloadTooLargeResponse,
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use super::{created, multipart};
use crate::error::ProductResult;
use crate::models::{
    Category, ImageForm, Product, ProductEnvelope, ProductImageForm, ProductPayload,
    ValidationErrorBody,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const BASE_PATH: &str = "/v1/product";

/// OpenAPI documentation for the `/v1/product` endpoints
#[derive(OpenApi)]
#[openapi(
    paths(
        list_all,
        view,
        create,
        create_validated,
        edit,
        delete,
        create_with_image,
        upload_image,
    ),
    components(
        schemas(
            Product, Category, ProductPayload, ProductEnvelope, ValidationErrorBody,
            ProductImageForm, ImageForm
        ),
        responses(BadRequestResponse, PayloadTooLargeResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products v1", description = "Product endpoints")
    )
)]
pub struct ControllerApiDoc;

pub fn router<R: ProductRepository + 'static>(
    service: Arc<ProductService<R>>,
    upload_limit: usize,
) -> Router {
    Router::new()
        .route(BASE_PATH, get(list_all).post(create))
        .route(&format!("{BASE_PATH}/create-validated"), post(create_validated))
        .route(
            &format!("{BASE_PATH}/create-with-image"),
            post(create_with_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            &format!("{BASE_PATH}/upload/image/{{id}}"),
            post(upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(view).put(edit).delete(delete),
        )
        .with_state(service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products v1",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_all<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.find_all().await?))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products v1",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found")
    )
)]
async fn view<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.get_product(&id).await?))
}

/// Create a product without field validation
#[utoipa::path(
    post,
    path = "",
    tag = "Products v1",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ProductResult<Response> {
    let Json(payload) = payload?;
    let product = service.create_product(payload).await?;
    created(BASE_PATH, &product, &product)
}

/// Create a product, reporting field errors
#[utoipa::path(
    post,
    path = "/create-validated",
    tag = "Products v1",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductEnvelope,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_validated<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ProductResult<Response> {
    let Json(raw) = payload?;
    let product = service
        .create_validated(ProductPayload::from_json(raw)?)
        .await?;
    created(BASE_PATH, &product, ProductEnvelope { product: product.clone() })
}

/// Update name and price of a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products v1",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product updated", body = Product,
            headers(("Location" = String, description = "URL of the product"))),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn edit<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ProductResult<Response> {
    let Json(payload) = payload?;
    let product = service.update_product(&id, payload).await?;
    created(BASE_PATH, &product, &product)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products v1",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<StatusCode> {
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a product from a multipart form with its image
///
/// Fields: `name`, `price`, `category.id`, `category.name`, `file`.
#[utoipa::path(
    post,
    path = "/create-with-image",
    tag = "Products v1",
    request_body(content = ProductImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Missing file or invalid fields", body = ValidationErrorBody),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_with_image<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    form_data: Multipart,
) -> ProductResult<Response> {
    let (form, file) = multipart::read_product_parts(form_data).await?;
    let upload = multipart::require_file(file)?;

    let product = service.create_with_image(form, upload).await?;
    created(BASE_PATH, &product, &product)
}

/// Replace the image of a product
#[utoipa::path(
    post,
    path = "/upload/image/{id}",
    tag = "Products v1",
    params(("id" = String, Path, description = "Product id")),
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image uploaded", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, description = "Product not found"),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_image<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    form_data: Multipart,
) -> ProductResult<impl IntoResponse> {
    let upload = multipart::read_image(form_data).await?;
    let product = service.upload_image(&id, upload).await?;
    Ok(Json(product))
}
