use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MuscleGroup {
    pub muscle_group_id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// A muscle group that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMuscleGroup {
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl NewMuscleGroup {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }
}
