use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Product;

/// Read-only product lookups. Products are maintained elsewhere.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get_by_id(&self, product_id: i32) -> Result<Option<Product>, DatabaseError>;

    async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, DatabaseError>;
}

const PRODUCT_COLUMNS: &str =
    "product_id, name, price, category_id, description, subcategory, stock, featured, image_url";

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn get_by_id(&self, product_id: i32) -> Result<Option<Product>, DatabaseError> {
        let sql = format!("SELECT {} FROM products WHERE product_id = $1", PRODUCT_COLUMNS);
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn list_by_category_id(&self, category_id: i32) -> Result<Vec<Product>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM products WHERE category_id = $1 ORDER BY product_id",
            PRODUCT_COLUMNS
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }
}
