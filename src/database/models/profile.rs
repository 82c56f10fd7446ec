use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Contact and display details for a user. `user_id` in a request body is
/// ignored; the profile always belongs to the authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Profile {
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}
