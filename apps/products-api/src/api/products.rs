//! Products API routes

use axum::Router;
use domain_products::{
    ImageStorage, MongoCategoryRepository, MongoProductRepository, ProductService, handlers,
    seed_sample_data,
};

use crate::state::AppState;

/// Mount both product surfaces over one service
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let storage = ImageStorage::new(&state.config.upload.path);
    let service = ProductService::new(repository, storage);
    handlers::router(service, state.config.upload.max_bytes)
}

/// Initialize product and category indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db).init_indexes().await?;
    MongoCategoryRepository::new(&state.db).init_indexes().await?;
    Ok(())
}

/// Replace the catalogue with the sample categories and products
pub async fn seed(state: &AppState) -> eyre::Result<()> {
    let categories = MongoCategoryRepository::new(&state.db);
    let products = MongoProductRepository::new(&state.db);

    let seeded = seed_sample_data(&categories, &products).await?;
    tracing::info!(products = seeded.len(), "Seeded sample data");
    Ok(())
}
