//! MongoDB implementations of the product and category repositories

use async_trait::async_trait;
use chrono::{DateTime as ChronoDateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{DateTime, doc, oid::ObjectId},
    options::IndexOptions,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Category, Product};
use crate::repository::{CategoryRepository, ProductRepository};

const PRODUCTS_COLLECTION: &str = "products";
const CATEGORIES_COLLECTION: &str = "categories";

/// Stored shape of a product: `_id` is an ObjectId, the category is
/// embedded as a plain sub-document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: f64,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime>,
}

impl ProductDocument {
    fn new(id: ObjectId, product: &Product) -> Self {
        Self {
            id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            created_at: product
                .created_at
                .map(|at| DateTime::from_millis(at.timestamp_millis())),
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: Some(doc.id.to_hex()),
            name: doc.name,
            price: doc.price,
            image: doc.image,
            category: doc.category,
            created_at: doc
                .created_at
                .and_then(|at| ChronoDateTime::<Utc>::from_timestamp_millis(at.timestamp_millis())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
}

impl From<CategoryDocument> for Category {
    fn from(doc: CategoryDocument) -> Self {
        Self {
            id: Some(doc.id.to_hex()),
            name: doc.name,
        }
    }
}

/// Ids that are not valid ObjectIds can never match a stored document.
fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Id to store under: a fresh one for new entities, the parsed one otherwise.
fn id_for_save(id: Option<&str>) -> ProductResult<(ObjectId, bool)> {
    match id {
        None => Ok((ObjectId::new(), true)),
        Some(raw) => parse_id(raw)
            .map(|oid| (oid, false))
            .ok_or_else(|| ProductError::BadRequest(format!("Invalid id '{}'", raw))),
    }
}

fn name_index() -> IndexModel {
    // Not unique: duplicate names are accepted and lookups return the first match
    IndexModel::builder()
        .keys(doc! { "name": 1 })
        .options(IndexOptions::builder().name("idx_name".to_string()).build())
        .build()
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    /// Use a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ProductDocument>(collection_name),
        }
    }

    /// Create the name lookup index
    pub async fn init_indexes(&self) -> ProductResult<()> {
        self.collection.create_index(name_index()).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Product>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let document = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let document = self
            .collection
            .find_one(doc! { "name": name })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(document.map(Product::from))
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let (oid, is_new) = id_for_save(product.id.as_deref())?;
        product.stamp_created_at();
        let document = ProductDocument::new(oid, &product);

        if is_new {
            self.collection.insert_one(&document).await?;
            tracing::info!(product_id = %oid, "Product inserted");
        } else {
            self.collection
                .replace_one(doc! { "_id": oid }, &document)
                .upsert(true)
                .await?;
            tracing::info!(product_id = %oid, "Product replaced");
        }

        Ok(Product::from(document))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<()> {
        let Some(oid) = parse_id(id) else {
            return Ok(());
        };
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        tracing::info!(product_id = %id, deleted = result.deleted_count, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}

/// MongoDB implementation of the CategoryRepository
pub struct MongoCategoryRepository {
    collection: Collection<CategoryDocument>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, CATEGORIES_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<CategoryDocument>(collection_name),
        }
    }

    pub async fn init_indexes(&self) -> ProductResult<()> {
        self.collection.create_index(name_index()).await?;
        tracing::info!("Category indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let documents: Vec<CategoryDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Category::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> ProductResult<Option<Category>> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };
        let document = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(document.map(Category::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> ProductResult<Option<Category>> {
        let document = self
            .collection
            .find_one(doc! { "name": name })
            .sort(doc! { "_id": 1 })
            .await?;
        Ok(document.map(Category::from))
    }

    #[instrument(skip(self, category), fields(category_name = %category.name))]
    async fn save(&self, category: Category) -> ProductResult<Category> {
        let (oid, is_new) = id_for_save(category.id.as_deref())?;
        let document = CategoryDocument {
            id: oid,
            name: category.name,
        };

        if is_new {
            self.collection.insert_one(&document).await?;
        } else {
            self.collection
                .replace_one(doc! { "_id": oid }, &document)
                .upsert(true)
                .await?;
        }

        tracing::debug!(category_id = %oid, "Category saved");
        Ok(Category::from(document))
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}
