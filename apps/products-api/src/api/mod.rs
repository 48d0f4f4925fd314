//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(products::router(state))
        .merge(health::router(state.clone()))
}

/// Initialize database indexes and optional sample data
pub async fn prepare_database(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await?;

    if state.config.seed_sample_data {
        products::seed(state).await?;
    }
    Ok(())
}
