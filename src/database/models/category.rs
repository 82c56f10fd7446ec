use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    #[serde(default)]
    pub category_id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category_id: 0,
            name: name.into(),
            description: description.into(),
        }
    }
}
