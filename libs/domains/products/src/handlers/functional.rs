//! Products endpoints under `/api/v2/products`
//!
//! Every write reports its result with a `Location` header.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
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
    Category, ImageForm, Product, ProductImageForm, ProductPayload, ValidationErrorBody,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const BASE_PATH: &str = "/api/v2/products";

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        upload_product_image,
        create_product_with_image,
    ),
    components(
        schemas(Product, Category, ProductPayload, ValidationErrorBody, ProductImageForm, ImageForm),
        responses(BadRequestResponse, PayloadTooLargeResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products v2", description = "Product endpoints")
    )
)]
pub struct FunctionalApiDoc;

pub fn router<R: ProductRepository + 'static>(
    service: Arc<ProductService<R>>,
    upload_limit: usize,
) -> Router {
    Router::new()
        .route(BASE_PATH, get(list_products).post(create_product))
        .route(
            &format!("{BASE_PATH}/create-with-img"),
            post(create_product_with_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            &format!("{BASE_PATH}/upload/{{id}}"),
            post(upload_product_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "",
    tag = "Products v2",
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    Ok(Json(service.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.get_product(&id).await?))
}

#[utoipa::path(
    post,
    path = "",
    tag = "Products v2",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ProductResult<Response> {
    let Json(raw) = payload?;
    let product = service
        .create_validated(ProductPayload::from_json(raw)?)
        .await?;
    created(BASE_PATH, &product, &product)
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product updated", body = Product,
            headers(("Location" = String, description = "URL of the product"))),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> ProductResult<Response> {
    let Json(payload) = payload?;
    let product = service.update_product(&id, payload).await?;
    created(BASE_PATH, &product, &product)
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products v2",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> ProductResult<StatusCode> {
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/upload/{id}",
    tag = "Products v2",
    params(("id" = String, Path, description = "Product id")),
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded", body = Product,
            headers(("Location" = String, description = "URL of the product"))),
        (status = 400, response = BadRequestResponse),
        (status = 404, description = "Product not found"),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_product_image<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
    form_data: Multipart,
) -> ProductResult<Response> {
    let upload = multipart::read_image(form_data).await?;
    let product = service.upload_image(&id, upload).await?;
    created(BASE_PATH, &product, &product)
}

#[utoipa::path(
    post,
    path = "/create-with-img",
    tag = "Products v2",
    request_body(content = ProductImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, description = "Missing file or invalid fields", body = ValidationErrorBody),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product_with_image<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    form_data: Multipart,
) -> ProductResult<Response> {
    let (form, file) = multipart::read_product_parts(form_data).await?;
    let upload = multipart::require_file(file)?;

    let product = service.create_with_image(form, upload).await?;
    created(BASE_PATH, &product, &product)
}
