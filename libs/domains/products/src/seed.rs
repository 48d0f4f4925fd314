//! Sample catalogue loaded at startup when seeding is enabled

use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Category, Product};
use crate::repository::{CategoryRepository, ProductRepository};

pub const SAMPLE_CATEGORIES: [&str; 4] = ["Electronic", "Sport", "Computing", "Furniture"];

/// (name, price, category name)
pub const SAMPLE_PRODUCTS: [(&str, f64, &str); 10] = [
    ("Samsung A70", 899.99, "Electronic"),
    ("Play Station 5 (PS5)", 2499.9, "Electronic"),
    ("TV Panasonic LCD Screen", 456.89, "Electronic"),
    ("Sony HD Digital Camera", 177.89, "Electronic"),
    ("Apple iPod", 46.89, "Electronic"),
    ("Sony Notebook", 846.89, "Computing"),
    ("HP Multifunction Printer", 200.89, "Computing"),
    ("Bianchi Bicycle", 70.89, "Sport"),
    ("HP Notebook Omen 17", 2500.89, "Computing"),
    ("Mica 5-Drawer Dresser", 150.89, "Furniture"),
];

/// Replace every product and category with the sample catalogue.
///
/// Each product embeds a copy of its saved category. Returns the saved
/// products in insertion order.
#[instrument(skip(categories, products))]
pub async fn seed_sample_data<C, P>(categories: &C, products: &P) -> ProductResult<Vec<Product>>
where
    C: CategoryRepository + ?Sized,
    P: ProductRepository + ?Sized,
{
    let removed_products = products.delete_all().await?;
    let removed_categories = categories.delete_all().await?;
    tracing::info!(removed_products, removed_categories, "Cleared existing catalogue");

    let mut saved_categories = Vec::with_capacity(SAMPLE_CATEGORIES.len());
    for name in SAMPLE_CATEGORIES {
        saved_categories.push(categories.save(Category::new(name)).await?);
    }

    let mut saved = Vec::with_capacity(SAMPLE_PRODUCTS.len());
    for (name, price, category_name) in SAMPLE_PRODUCTS {
        let category = saved_categories
            .iter()
            .find(|c| c.name == category_name)
            .cloned();
        let product = products.save(Product::new(name, price, category)).await?;
        tracing::debug!(product_id = ?product.id, name = %product.name, "Seeded product");
        saved.push(product);
    }

    tracing::info!(
        categories = saved_categories.len(),
        products = saved.len(),
        "Sample catalogue seeded"
    );
    Ok(saved)
}
