//! Product and Category services

use axum_helpers::field_error_messages;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, ImageUpload, Product, ProductForm, ProductPayload};
use crate::repository::{CategoryRepository, ProductRepository};
use crate::storage::ImageStorage;

/// Product operations shared by both HTTP surfaces
///
/// Upload operations write the file first and save the product second.
/// There is no transaction: a failed save leaves the written file behind.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    storage: ImageStorage,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, storage: ImageStorage) -> Self {
        Self {
            repository: Arc::new(repository),
            storage,
        }
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        self.repository.find_by_name(name).await
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    pub async fn save(&self, product: Product) -> ProductResult<Product> {
        self.repository.save(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    /// Get a product by id, or `NotFound`
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Save a new product without field validation.
    ///
    /// Name and price must still be present.
    #[instrument(skip(self, payload))]
    pub async fn create_product(&self, payload: ProductPayload) -> ProductResult<Product> {
        let product = Product::try_from(payload)?;
        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = ?saved.id, "Product created");
        Ok(saved)
    }

    /// Validate, then save a new product
    #[instrument(skip(self, payload))]
    pub async fn create_validated(&self, payload: ProductPayload) -> ProductResult<Product> {
        validate(&payload)?;
        self.create_product(payload).await
    }

    /// Copy name and price onto the stored product and save it
    #[instrument(skip(self, payload))]
    pub async fn update_product(&self, id: &str, payload: ProductPayload) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        product.apply_update(&payload);

        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let product = self.get_product(id).await?;
        let product_id = product.id.as_deref().unwrap_or(id);

        self.repository.delete(product_id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Create a product from multipart fields with its image attached
    #[instrument(skip(self, form, upload), fields(file_name = %upload.file_name))]
    pub async fn create_with_image(
        &self,
        form: ProductForm,
        upload: ImageUpload,
    ) -> ProductResult<Product> {
        let payload = form.into_payload()?;
        validate(&payload)?;

        let image = self.storage.store(&upload).await?;
        let mut product = Product::try_from(payload)?;
        product.image = Some(image);

        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = ?saved.id, image = ?saved.image, "Product created with image");
        Ok(saved)
    }

    /// Replace the image of an existing product
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name))]
    pub async fn upload_image(&self, id: &str, upload: ImageUpload) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;

        product.image = Some(self.storage.store(&upload).await?);

        let saved = self.repository.save(product).await?;
        tracing::info!(product_id = %id, image = ?saved.image, "Product image uploaded");
        Ok(saved)
    }
}

fn validate(payload: &ProductPayload) -> ProductResult<()> {
    payload
        .validate()
        .map_err(|e| ProductError::ValidationFailed {
            product: payload.clone(),
            errors: field_error_messages(&e),
        })
}

/// Pass-through over the category store
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ProductResult<Vec<Category>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> ProductResult<Option<Category>> {
        self.repository.find_by_id(id).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> ProductResult<Option<Category>> {
        self.repository.find_by_name(name).await
    }

    #[instrument(skip(self, category), fields(category_name = %category.name))]
    pub async fn save(&self, category: Category) -> ProductResult<Category> {
        self.repository.save(category).await
    }
}
