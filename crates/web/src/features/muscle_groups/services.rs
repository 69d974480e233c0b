use sqlx::SqlitePool;
use storage::{
    error::Result, models::MuscleGroup, repository::muscle_group::MuscleGroupRepository,
};

/// List the muscle group catalog
pub async fn list_muscle_groups(pool: &SqlitePool) -> Result<Vec<MuscleGroup>> {
    let repo = MuscleGroupRepository::new(pool);
    repo.list().await
}

/// Get one muscle group by ID
pub async fn get_muscle_group(pool: &SqlitePool, id: i64) -> Result<MuscleGroup> {
    let repo = MuscleGroupRepository::new(pool);
    repo.find_by_id(id).await
}
