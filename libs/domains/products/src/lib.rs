//! Products Domain
//!
//! Product and category catalogue backed by MongoDB, with product images
//! kept on the local filesystem.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Handlers (v1 / v2 surfaces)  │  ← HTTP endpoints
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │ Service          ImageStorage│  ← Validation, uploads
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │ Repository                   │  ← Trait + MongoDB / in-memory
//! └──────────────┬───────────────┘
//!                │
//! ┌──────────────▼───────────────┐
//! │ Models                       │  ← Entities, payloads
//! └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers, ImageStorage, MongoProductRepository, ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("products");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository, ImageStorage::new("./uploads"));
//!
//! // Mounts /v1/product and /api/v2/products
//! let router = handlers::router(service, 10 * 1024 * 1024);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod seed;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::{ControllerApiDoc, FunctionalApiDoc};
pub use memory::{InMemoryCategoryRepository, InMemoryProductRepository};
pub use models::{
    Category, ImageUpload, Product, ProductEnvelope, ProductForm, ProductPayload,
    ValidationErrorBody,
};
pub use mongodb::{MongoCategoryRepository, MongoProductRepository};
pub use repository::{CategoryRepository, ProductRepository};
pub use seed::seed_sample_data;
pub use service::{CategoryService, ProductService};
pub use storage::ImageStorage;
