use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Category;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories in storage order; empty when none exist.
    async fn list_all(&self) -> Result<Vec<Category>, DatabaseError>;

    /// `None` when no row matches. Absence is not an error.
    async fn get_by_id(&self, category_id: i32) -> Result<Option<Category>, DatabaseError>;

    /// Insert a new row. Any id on `category` is ignored; the returned record
    /// carries the generated one.
    async fn create(&self, category: &Category) -> Result<Category, DatabaseError>;

    /// Overwrite name and description. No-op if the id does not exist.
    async fn update(&self, category_id: i32, category: &Category) -> Result<(), DatabaseError>;

    /// No-op if the id does not exist. `DatabaseError::Conflict` while
    /// products still reference the category.
    async fn delete(&self, category_id: i32) -> Result<(), DatabaseError>;
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_all(&self) -> Result<Vec<Category>, DatabaseError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT category_id, name, description FROM categories ORDER BY category_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get_by_id(&self, category_id: i32) -> Result<Option<Category>, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT category_id, name, description FROM categories WHERE category_id = $1",
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, category: &Category) -> Result<Category, DatabaseError> {
        let created = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             RETURNING category_id, name, description",
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created category {} ({})", created.category_id, created.name);
        Ok(created)
    }

    async fn update(&self, category_id: i32, category: &Category) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE categories
             SET name = $1, description = $2
             WHERE category_id = $3",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, category_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                    DatabaseError::Conflict(format!("Category {} still has products", category_id))
                }
                other => DatabaseError::Sqlx(other),
            })?;

        Ok(())
    }
}
