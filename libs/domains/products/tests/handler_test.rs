//! Handler tests for Products domain
//!
//! These tests drive both HTTP surfaces through `oneshot()` against the
//! in-memory repository and a temporary upload directory:
//! - Status codes and `Location` headers
//! - Response bodies (products, validation reports, empty 404s)
//! - Multipart uploads

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";
const UPLOAD_LIMIT: usize = 1024 * 1024;

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn raw_body(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

struct TestApp {
    router: Router,
    repository: InMemoryProductRepository,
    uploads: TempDir,
}

impl TestApp {
    fn new() -> Self {
        Self::with_limit(UPLOAD_LIMIT)
    }

    fn with_limit(upload_limit: usize) -> Self {
        let uploads = TempDir::new().unwrap();
        let repository = InMemoryProductRepository::new();
        let service = ProductService::new(repository.clone(), ImageStorage::new(uploads.path()));

        Self {
            router: handlers::router(service, upload_limit),
            repository,
            uploads,
        }
    }

    async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn seed(&self, name: &str, price: f64) -> Product {
        self.repository
            .save(Product::new(name, price, Some(Category::new("Sport"))))
            .await
            .unwrap()
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File(file_name, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn location(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// /v1/product
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_v1_list_empty_returns_empty_array() {
    let app = TestApp::new();

    let response = app.send(empty_request("GET", "/v1/product")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_v1_create_returns_201_with_location() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("v1_create");
    let name = builder.name("product", "main");

    let response = app
        .send(json_request(
            "POST",
            "/v1/product",
            json!({ "name": name, "price": 899.99, "category": { "name": "Electronic" } }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = location(&response);
    let product: Product = json_body(response.into_body()).await;

    let id = product.id.clone().unwrap();
    assert_eq!(location, format!("/v1/product/{id}"));
    assert_eq!(product.name, name);
    assert_eq!(product.price, 899.99);
    assert_eq!(product.category.unwrap().name, "Electronic");
    assert!(product.image.is_none());
    assert!(product.created_at.is_some());
}

#[tokio::test]
async fn test_v2_created_product_reads_back_by_location() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/v2/products",
            json!({ "name": "Samsung S25", "price": 3200500.00, "category": { "name": "Electronic" } }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = location(&response);
    let created: Product = json_body(response.into_body()).await;
    assert!(!created.id.clone().unwrap().is_empty());

    let response = app.send(empty_request("GET", &location)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Product = json_body(response.into_body()).await;
    assert_eq!(fetched.name, "Samsung S25");
    assert_eq!(fetched.price, 3200500.00);
    assert_eq!(fetched.category.unwrap().name, "Electronic");
}

#[tokio::test]
async fn test_v1_create_without_name_returns_400() {
    let app = TestApp::new();

    let response = app
        .send(json_request("POST", "/v1/product", json!({ "price": 10.0 })))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Field name must not be null");
    assert!(app.repository.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v1_create_with_malformed_json_is_client_error() {
    let app = TestApp::new();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/product")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.send(request).await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_v1_view_returns_product() {
    let app = TestApp::new();
    let saved = app.seed("Bianchi Bicycle", 70.89).await;
    let id = saved.id.clone().unwrap();

    let response = app.send(empty_request("GET", &format!("/v1/product/{id}"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product, saved);
}

#[tokio::test]
async fn test_v1_view_unknown_id_returns_empty_404() {
    let app = TestApp::new();

    let response = app
        .send(empty_request("GET", "/v1/product/65f1c2a9e4b0a1b2c3d4e5f7"))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_v1_create_validated_reports_field_errors() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/v1/product/create-validated",
            json!({ "name": "", "price": 5.0 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["product"]["name"], "");
    assert_eq!(body["product"]["price"], 5.0);
    assert_eq!(body["errors"], json!(["Field name must not be empty"]));
    assert!(app.repository.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v1_create_validated_reports_missing_fields() {
    let app = TestApp::new();

    let response = app
        .send(json_request("POST", "/v1/product/create-validated", json!({})))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorBody = json_body(response.into_body()).await;
    assert_eq!(
        body.errors,
        vec![
            "Field name must not be null".to_string(),
            "Field price must not be null".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_v1_create_validated_rejects_text_price() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/v1/product/create-validated",
            json!({ "name": "x", "price": "abc" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorBody = json_body(response.into_body()).await;
    assert_eq!(body.product.name.as_deref(), Some("x"));
    assert_eq!(body.errors, vec!["Field price must be a number".to_string()]);
    assert!(app.repository.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v1_create_validated_wraps_product() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/v1/product/create-validated",
            json!({ "name": "Apple iPod", "price": 46.89 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = location(&response);
    let body: ProductEnvelope = json_body(response.into_body()).await;
    assert_eq!(body.product.name, "Apple iPod");
    assert_eq!(location, format!("/v1/product/{}", body.product.id.unwrap()));
}

#[tokio::test]
async fn test_v1_edit_updates_name_and_price_only() {
    let app = TestApp::new();
    let mut saved = app.seed("Sony Notebook", 846.89).await;
    saved.image = Some("existing.png".to_string());
    let saved = app.repository.save(saved).await.unwrap();
    let id = saved.id.clone().unwrap();

    let response = app
        .send(json_request(
            "PUT",
            &format!("/v1/product/{id}"),
            json!({ "name": "Sony Vaio", "price": 799.0, "image": "ignored.png" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(location(&response), format!("/v1/product/{id}"));
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, saved.id);
    assert_eq!(product.name, "Sony Vaio");
    assert_eq!(product.price, 799.0);
    assert_eq!(product.image.as_deref(), Some("existing.png"));
    assert_eq!(product.category, saved.category);
}

#[tokio::test]
async fn test_v1_edit_unknown_id_returns_404() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "PUT",
            "/v1/product/65f1c2a9e4b0a1b2c3d4e5f7",
            json!({ "name": "Ghost", "price": 1.0 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_v1_delete_then_view_returns_404() {
    let app = TestApp::new();
    let saved = app.seed("Mica 5-Drawer Dresser", 150.89).await;
    let uri = format!("/v1/product/{}", saved.id.unwrap());

    let response = app.send(empty_request("DELETE", &uri)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.send(empty_request("GET", &uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(empty_request("DELETE", &uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_v1_create_with_image_stores_file() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/v1/product/create-with-image",
            &[
                Part::Text("name", "Sony HD Digital Camera"),
                Part::Text("price", "177.89"),
                Part::Text("category.name", "Electronic"),
                Part::File("my photo.png", b"\x89PNG fake"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = location(&response);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(location, format!("/v1/product/{}", product.id.clone().unwrap()));
    assert_eq!(product.name, "Sony HD Digital Camera");
    assert_eq!(product.price, 177.89);
    assert_eq!(product.category.unwrap().name, "Electronic");

    let image = product.image.unwrap();
    assert!(image.ends_with("-myphoto.png"), "unexpected name {image}");
    let stored = std::fs::read(app.uploads.path().join(&image)).unwrap();
    assert_eq!(stored, b"\x89PNG fake");
}

#[tokio::test]
async fn test_v1_create_with_image_requires_file() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/v1/product/create-with-image",
            &[Part::Text("name", "No Image"), Part::Text("price", "1.5")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.repository.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v1_create_with_image_rejects_non_numeric_price() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/v1/product/create-with-image",
            &[
                Part::Text("name", "Bad Price"),
                Part::Text("price", "cheap"),
                Part::File("a.png", b"data"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorBody = json_body(response.into_body()).await;
    assert_eq!(body.errors, vec!["Field price must be a number".to_string()]);
    assert_eq!(std::fs::read_dir(app.uploads.path()).map(|d| d.count()).unwrap_or(0), 0);
}

#[tokio::test]
async fn test_v1_upload_image_returns_200() {
    let app = TestApp::new();
    let saved = app.seed("HP Notebook Omen 17", 2500.89).await;
    let id = saved.id.clone().unwrap();

    let response = app
        .send(multipart_request(
            &format!("/v1/product/upload/image/{id}"),
            &[Part::File("omen.jpg", b"jpeg bytes")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.id, saved.id);
    assert!(product.image.unwrap().ends_with("-omen.jpg"));
}

#[tokio::test]
async fn test_v1_upload_image_unknown_product_returns_404() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/v1/product/upload/image/65f1c2a9e4b0a1b2c3d4e5f7",
            &[Part::File("a.png", b"data")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_upload_over_limit_returns_413() {
    let app = TestApp::with_limit(256);
    let saved = app.seed("Big Picture", 10.0).await;
    let id = saved.id.unwrap();
    let large = vec![b'x'; 4096];

    let response = app
        .send(multipart_request(
            &format!("/v1/product/upload/image/{id}"),
            &[Part::File("big.png", &large)],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// ---------------------------------------------------------------------------
// /api/v2/products
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_v2_list_returns_saved_products_in_order() {
    let app = TestApp::new();
    app.seed("First", 1.0).await;
    app.seed("Second", 2.0).await;

    let response = app.send(empty_request("GET", "/api/v2/products")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Product> = json_body(response.into_body()).await;
    let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["First", "Second"]);
}

#[tokio::test]
async fn test_v2_create_returns_201_with_location() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/v2/products",
            json!({ "name": "Play Station 5 (PS5)", "price": 2499.9 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = location(&response);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(location, format!("/api/v2/products/{}", product.id.unwrap()));
    assert_eq!(product.name, "Play Station 5 (PS5)");
}

#[tokio::test]
async fn test_v2_create_validates_input() {
    let app = TestApp::new();

    let response = app
        .send(json_request("POST", "/api/v2/products", json!({ "name": "" })))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ValidationErrorBody = json_body(response.into_body()).await;
    assert_eq!(
        body.errors,
        vec![
            "Field name must not be empty".to_string(),
            "Field price must not be null".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_v2_create_rejects_text_price() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/v2/products",
            json!({ "name": "x", "price": "abc" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["product"]["name"], "x");
    assert_eq!(body["errors"], json!(["Field price must be a number"]));
    assert!(app.repository.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v2_get_unknown_and_malformed_ids_return_404() {
    let app = TestApp::new();

    for id in ["65f1c2a9e4b0a1b2c3d4e5f7", "not-an-object-id"] {
        let response = app
            .send(empty_request("GET", &format!("/api/v2/products/{id}")))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "id {id}");
    }
}

#[tokio::test]
async fn test_v2_update_returns_201_with_location() {
    let app = TestApp::new();
    let saved = app.seed("TV Panasonic LCD Screen", 456.89).await;
    let id = saved.id.clone().unwrap();

    let response = app
        .send(json_request(
            "PUT",
            &format!("/api/v2/products/{id}"),
            json!({ "name": "TV Panasonic OLED", "price": 999.0 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(location(&response), format!("/api/v2/products/{id}"));

    let stored = app.repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.name, "TV Panasonic OLED");
    assert_eq!(stored.price, 999.0);
}

#[tokio::test]
async fn test_v2_delete_returns_204() {
    let app = TestApp::new();
    let saved = app.seed("Apple iPod", 46.89).await;
    let id = saved.id.unwrap();

    let response = app
        .send(empty_request("DELETE", &format!("/api/v2/products/{id}")))
        .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(app.repository.find_by_id(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_v2_update_unknown_id_returns_empty_404() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "PUT",
            "/api/v2/products/65f1c2a9e4b0a1b2c3d4e5f7",
            json!({ "name": "Ghost", "price": 1.0 }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
    assert!(app.repository.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_v2_delete_unknown_id_returns_empty_404() {
    let app = TestApp::new();
    app.seed("Bicycle", 199.9).await;

    let response = app
        .send(empty_request(
            "DELETE",
            "/api/v2/products/65f1c2a9e4b0a1b2c3d4e5f7",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
    assert_eq!(app.repository.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_v2_upload_unknown_product_returns_empty_404() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/api/v2/products/upload/65f1c2a9e4b0a1b2c3d4e5f7",
            &[Part::File("a.png", b"data")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(raw_body(response.into_body()).await.is_empty());
}

#[tokio::test]
async fn test_v2_upload_write_failure_hides_io_error() {
    let app = TestApp::new();
    let saved = app.seed("Samsung A70", 899.99).await;

    let response = app
        .send(multipart_request(
            &format!("/api/v2/products/upload/{}", saved.id.unwrap()),
            &[Part::File("nested/dir.png", b"data")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "STORAGE_ERROR");
    assert_eq!(body["message"], "File storage error occurred");
}

#[tokio::test]
async fn test_v2_upload_twice_stores_distinct_files() {
    let app = TestApp::new();
    let saved = app.seed("Samsung A70", 899.99).await;
    let id = saved.id.unwrap();
    let uri = format!("/api/v2/products/upload/{id}");

    let first = app
        .send(multipart_request(&uri, &[Part::File("phone.png", b"one")]))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(location(&first), format!("/api/v2/products/{id}"));
    let first: Product = json_body(first.into_body()).await;

    let second = app
        .send(multipart_request(&uri, &[Part::File("phone.png", b"two")]))
        .await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second: Product = json_body(second.into_body()).await;

    let first_image = first.image.unwrap();
    let second_image = second.image.unwrap();
    assert_ne!(first_image, second_image);

    let stored = app.repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.image.as_deref(), Some(second_image.as_str()));
    assert!(app.uploads.path().join(&first_image).exists());
    assert!(app.uploads.path().join(&second_image).exists());
}

#[tokio::test]
async fn test_v2_upload_without_file_returns_400() {
    let app = TestApp::new();
    let saved = app.seed("Samsung A70", 899.99).await;

    let response = app
        .send(multipart_request(
            &format!("/api/v2/products/upload/{}", saved.id.unwrap()),
            &[Part::Text("description", "no file here")],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Required part 'file' is missing");
}

#[tokio::test]
async fn test_v2_create_with_img_links_category() {
    let app = TestApp::new();

    let response = app
        .send(multipart_request(
            "/api/v2/products/create-with-img",
            &[
                Part::Text("name", "HP Multifunction Printer"),
                Part::Text("price", "200.89"),
                Part::Text("category.id", "65f1c2a9e4b0a1b2c3d4e5f0"),
                Part::Text("category.name", "Computing"),
                Part::File("printer.png", b"png"),
            ],
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = location(&response);
    let product: Product = json_body(response.into_body()).await;
    assert_eq!(location, format!("/api/v2/products/{}", product.id.unwrap()));

    let category = product.category.unwrap();
    assert_eq!(category.id.as_deref(), Some("65f1c2a9e4b0a1b2c3d4e5f0"));
    assert_eq!(category.name, "Computing");
    assert!(product.image.unwrap().ends_with("-printer.png"));
}
