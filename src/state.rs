use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::database::repository::{
    CategoryRepository, PgCategoryRepository, PgProductRepository, PgProfileRepository,
    PgShoppingCartRepository, PgUserRepository, ProductRepository, ProfileRepository,
    ShoppingCartRepository, UserRepository,
};

/// Shared handler state. Repositories are trait objects so the router can run
/// against PostgreSQL or in-memory stores.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when the state is not backed by PostgreSQL
    pub pool: Option<PgPool>,
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn ShoppingCartRepository>,
}

impl AppState {
    pub fn postgres(config: AppConfig, pool: PgPool) -> Self {
        let products: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(pool.clone()));

        Self {
            config: Arc::new(config),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            carts: Arc::new(PgShoppingCartRepository::new(pool.clone(), products.clone())),
            products,
            pool: Some(pool),
        }
    }
}
