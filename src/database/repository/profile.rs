use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Profile;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Option<Profile>, DatabaseError>;

    /// Full replace of the user's profile. Every field is overwritten; a
    /// missing row is created. `profile.user_id` is ignored.
    async fn update(&self, user_id: i32, profile: &Profile) -> Result<(), DatabaseError>;
}

#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Option<Profile>, DatabaseError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT user_id, first_name, last_name, phone, email, address, city, state, zip
             FROM profiles
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    async fn update(&self, user_id: i32, profile: &Profile) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, first_name, last_name, phone, email, address, city, state, zip)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                email = EXCLUDED.email,
                address = EXCLUDED.address,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                zip = EXCLUDED.zip
            "#,
        )
        .bind(user_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.phone)
        .bind(&profile.email)
        .bind(&profile.address)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.zip)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
