//! Integration tests for the MongoDB repositories
//!
//! These tests use a real MongoDB via testcontainers and need Docker:
//!
//! ```sh
//! cargo test -p domain_products --test mongodb_test -- --ignored
//! ```

use domain_products::*;
use test_utils::{TestDataBuilder, TestMongo, assertions::*};

// ============================================================================
// Product Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_and_find_product() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("save_and_find_product");
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();

    let category = Category {
        id: Some("65f1c2a9e4b0a1b2c3d4e5f0".to_string()),
        name: "Electronic".to_string(),
    };
    let input = Product::new(
        builder.name("product", "main"),
        builder.price(),
        Some(category.clone()),
    );

    let created = repo.save(input.clone()).await.unwrap();
    let id = assert_some(created.id.clone(), "saved product id");
    assert_eq!(id.len(), 24);
    assert!(created.created_at.is_some());

    let retrieved = assert_some(repo.find_by_id(&id).await.unwrap(), "product should exist");
    assert_eq!(retrieved.name, input.name);
    assert_price_eq(retrieved.price, input.price, "price");
    assert_eq!(retrieved.category, Some(category));
    assert_eq!(retrieved.created_at, created.created_at);

    let by_name = assert_some(
        repo.find_by_name(&input.name).await.unwrap(),
        "product by name",
    );
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_with_id_replaces_document() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("save_replaces");
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));

    let mut product = repo
        .save(Product::new("Sony Notebook", 846.89, None))
        .await
        .unwrap();
    product.name = "Sony Vaio".to_string();
    product.image = Some("vaio.png".to_string());

    let updated = repo.save(product.clone()).await.unwrap();
    assert_eq!(updated.id, product.id);
    assert_eq!(updated.created_at, product.created_at);

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Sony Vaio");
    assert_eq!(all[0].image.as_deref(), Some("vaio.png"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_all_is_in_insertion_order() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("find_all_order");
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));

    for name in ["First", "Second", "Third"] {
        repo.save(Product::new(name, 1.0, None)).await.unwrap();
    }

    let names: Vec<_> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unknown_and_malformed_ids_are_absent() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("unknown_ids");
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));

    assert!(
        repo.find_by_id("65f1c2a9e4b0a1b2c3d4e5f7")
            .await
            .unwrap()
            .is_none()
    );
    assert!(repo.find_by_id("not-an-object-id").await.unwrap().is_none());
    repo.delete("not-an-object-id").await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_and_delete_all() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("delete_products");
    let repo = MongoProductRepository::new(&mongo.database(&builder.database_name()));

    let first = repo.save(Product::new("A", 1.0, None)).await.unwrap();
    repo.save(Product::new("B", 2.0, None)).await.unwrap();
    repo.save(Product::new("C", 3.0, None)).await.unwrap();

    repo.delete(first.id.as_deref().unwrap()).await.unwrap();
    assert_eq!(repo.find_all().await.unwrap().len(), 2);

    assert_eq!(repo.delete_all().await.unwrap(), 2);
    assert!(repo.find_all().await.unwrap().is_empty());
}

// ============================================================================
// Category Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_category_names_return_first() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("duplicate_categories");
    let repo = MongoCategoryRepository::new(&mongo.database(&builder.database_name()));
    repo.init_indexes().await.unwrap();

    let first = repo.save(Category::new("Sport")).await.unwrap();
    let second = repo.save(Category::new("Sport")).await.unwrap();
    assert_ne!(first.id, second.id);

    let found = assert_some(repo.find_by_name("Sport").await.unwrap(), "category");
    assert_eq!(found.id, first.id);
    assert_eq!(repo.find_all().await.unwrap().len(), 2);
}

// ============================================================================
// Seeding
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_seed_sample_data_against_mongo() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("seed_mongo");
    let db = mongo.database(&builder.database_name());
    let categories = MongoCategoryRepository::new(&db);
    let products = MongoProductRepository::new(&db);

    let seeded = seed_sample_data(&categories, &products).await.unwrap();
    assert_eq!(seeded.len(), 10);

    let ps5 = assert_some(
        products.find_by_name("Play Station 5 (PS5)").await.unwrap(),
        "seeded PS5",
    );
    let electronic = categories.find_by_name("Electronic").await.unwrap();
    assert_eq!(ps5.category, electronic);
    assert_price_eq(ps5.price, 2499.9, "PS5 price");
}
