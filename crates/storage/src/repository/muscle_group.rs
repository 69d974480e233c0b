use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::{MuscleGroup, NewMuscleGroup};

/// Repository for the muscle group catalog
pub struct MuscleGroupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MuscleGroupRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all muscle groups in catalog order
    pub async fn list(&self) -> Result<Vec<MuscleGroup>> {
        let groups = sqlx::query_as::<_, MuscleGroup>(
            r#"
            SELECT muscle_group_id, name, description, icon
            FROM muscle_groups
            ORDER BY muscle_group_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(groups)
    }

    /// Find a muscle group by ID
    pub async fn find_by_id(&self, id: i64) -> Result<MuscleGroup> {
        let group = sqlx::query_as::<_, MuscleGroup>(
            r#"
            SELECT muscle_group_id, name, description, icon
            FROM muscle_groups
            WHERE muscle_group_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(group)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM muscle_groups")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Insert a batch of muscle groups inside one transaction.
    /// Either every row is written or none is.
    pub async fn insert_many(&self, groups: &[NewMuscleGroup]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for group in groups {
            let result = sqlx::query(
                r#"
                INSERT INTO muscle_groups (name, description, icon)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(&group.name)
            .bind(&group.description)
            .bind(&group.icon)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::from)
            .map_err(|e| {
                if e.is_unique_violation() {
                    StorageError::ConstraintViolation(format!(
                        "Muscle group '{}' already exists",
                        group.name
                    ))
                } else {
                    e
                }
            })?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;

        Ok(inserted)
    }
}
