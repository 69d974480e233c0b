use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response containing a muscle group from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MuscleGroupResponse {
    pub muscle_group_id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<crate::models::MuscleGroup> for MuscleGroupResponse {
    fn from(group: crate::models::MuscleGroup) -> Self {
        Self {
            muscle_group_id: group.muscle_group_id,
            name: group.name,
            description: group.description,
            icon: group.icon,
        }
    }
}
