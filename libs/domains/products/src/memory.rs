//! In-memory repositories for tests and local runs without MongoDB

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Category, Product};
use crate::repository::{CategoryRepository, ProductRepository};

/// Insertion-ordered product store
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id.as_deref() == Some(id)).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.name == name).cloned())
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        product.stamp_created_at();

        let existing = product
            .id
            .as_deref()
            .and_then(|id| products.iter().position(|p| p.id.as_deref() == Some(id)));

        match existing {
            Some(index) => products[index] = product.clone(),
            None => {
                if product.id.is_none() {
                    product.id = Some(ObjectId::new().to_hex());
                }
                products.push(product.clone());
            }
        }

        tracing::debug!(product_id = ?product.id, "Saved product");
        Ok(product)
    }

    async fn delete(&self, id: &str) -> ProductResult<()> {
        self.products
            .write()
            .await
            .retain(|p| p.id.as_deref() != Some(id));
        Ok(())
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        let count = products.len() as u64;
        products.clear();
        Ok(count)
    }
}

/// Insertion-ordered category store
#[derive(Clone, Default)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> ProductResult<Vec<Category>> {
        Ok(self.categories.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.name == name).cloned())
    }

    async fn save(&self, mut category: Category) -> ProductResult<Category> {
        let mut categories = self.categories.write().await;

        let existing = category
            .id
            .as_deref()
            .and_then(|id| categories.iter().position(|c| c.id.as_deref() == Some(id)));

        match existing {
            Some(index) => categories[index] = category.clone(),
            None => {
                if category.id.is_none() {
                    category.id = Some(ObjectId::new().to_hex());
                }
                categories.push(category.clone());
            }
        }

        Ok(category)
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut categories = self.categories.write().await;
        let count = categories.len() as u64;
        categories.clear();
        Ok(count)
    }
}
