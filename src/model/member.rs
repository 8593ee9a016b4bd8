use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Entry of the roster table: someone expected to have attendance rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Member {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Alice")]
    pub name: String,
}

impl Member {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}
