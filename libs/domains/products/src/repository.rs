use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{Category, Product};

/// Repository trait for Product persistence
///
/// Implementations assign an id on first save and replace the stored
/// document when the id is already set. Ids that are not known to the store
/// behave as absent rather than as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in store order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// First product with exactly this name
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>>;

    /// Insert when `product.id` is `None`, otherwise replace
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Remove the product with this id; unknown ids are ignored
    async fn delete(&self, id: &str) -> ProductResult<()>;

    /// Remove every product
    async fn delete_all(&self) -> ProductResult<u64>;
}

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> ProductResult<Vec<Category>>;

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Category>>;

    /// First category with exactly this name; names are not unique
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Category>>;

    /// Insert when `category.id` is `None`, otherwise replace
    async fn save(&self, category: Category) -> ProductResult<Category>;

    /// Remove every category
    async fn delete_all(&self) -> ProductResult<u64>;
}
