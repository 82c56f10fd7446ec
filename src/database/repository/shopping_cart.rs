use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{CartLine, ShoppingCart, ShoppingCartItem};

use super::product::ProductRepository;

#[async_trait]
pub trait ShoppingCartRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: i32) -> Result<ShoppingCart, DatabaseError>;

    /// Insert the product with quantity 1, or increment an existing line by
    /// exactly one. Returns the cart as stored afterwards.
    async fn add_product_to_cart(&self, user_id: i32, product_id: i32) -> Result<ShoppingCart, DatabaseError>;

    /// Set the quantity of an existing line. No-op if the line does not exist.
    async fn update_product_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), DatabaseError>;

    /// Remove every line for the user. Idempotent.
    async fn clear_cart(&self, user_id: i32) -> Result<(), DatabaseError>;
}

/// Resolve each cart line through the product lookup and build the cart.
///
/// Lines whose product no longer exists are skipped with a warning. A storage
/// fault during any lookup fails the whole read.
pub async fn assemble_cart(
    user_id: i32,
    lines: Vec<CartLine>,
    products: &dyn ProductRepository,
) -> Result<ShoppingCart, DatabaseError> {
    let mut cart = ShoppingCart::new();

    for line in lines {
        match products.get_by_id(line.product_id).await? {
            Some(product) => cart.add(ShoppingCartItem::new(product, line.quantity)),
            None => {
                tracing::warn!(
                    "Skipping cart line for missing product {} (user {})",
                    line.product_id,
                    user_id
                );
            }
        }
    }

    Ok(cart)
}

#[derive(Clone)]
pub struct PgShoppingCartRepository {
    pool: PgPool,
    products: Arc<dyn ProductRepository>,
}

impl PgShoppingCartRepository {
    pub fn new(pool: PgPool, products: Arc<dyn ProductRepository>) -> Self {
        Self { pool, products }
    }
}

#[async_trait]
impl ShoppingCartRepository for PgShoppingCartRepository {
    async fn get_by_user_id(&self, user_id: i32) -> Result<ShoppingCart, DatabaseError> {
        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT product_id, quantity FROM shopping_cart WHERE user_id = $1 ORDER BY product_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        assemble_cart(user_id, lines, self.products.as_ref()).await
    }

    async fn add_product_to_cart(&self, user_id: i32, product_id: i32) -> Result<ShoppingCart, DatabaseError> {
        // The (user_id, product_id) key turns concurrent adds into increments of one row
        sqlx::query(
            r#"
            INSERT INTO shopping_cart (user_id, product_id, quantity)
            VALUES ($1, $2, 1)
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = shopping_cart.quantity + 1
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        self.get_by_user_id(user_id).await
    }

    async fn update_product_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE shopping_cart SET quantity = $1 WHERE user_id = $2 AND product_id = $3")
            .bind(quantity)
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_cart(&self, user_id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM shopping_cart WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Cleared {} cart line(s) for user {}", result.rows_affected(), user_id);
        Ok(())
    }
}
