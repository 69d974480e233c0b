//! Owned persistence boundary consumed by the presentation layer.
//!
//! The repositories borrow a pool for the duration of a call; these traits
//! let a state holder keep an `Arc<dyn ...>` and be tested against a mock.

use async_trait::async_trait;

use crate::Database;
use crate::error::Result;
use crate::models::{MuscleGroup, NewMuscleGroup, UserPreferences};
use crate::repository::muscle_group::MuscleGroupRepository;
use crate::repository::preferences::PreferencesRepository;

#[async_trait]
pub trait MuscleGroupStore: Send + Sync {
    async fn list_muscle_groups(&self) -> Result<Vec<MuscleGroup>>;

    /// Inserts the whole batch atomically and returns the number of rows written.
    async fn insert_muscle_groups(&self, groups: &[NewMuscleGroup]) -> Result<u64>;
}

#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn find_preferences(&self, user_id: i64) -> Result<Option<UserPreferences>>;

    async fn insert_preferences(&self, prefs: &UserPreferences) -> Result<UserPreferences>;

    async fn update_preferences(&self, prefs: &UserPreferences) -> Result<UserPreferences>;

    async fn upsert_preferences(&self, prefs: &UserPreferences) -> Result<UserPreferences>;
}

#[async_trait]
impl MuscleGroupStore for Database {
    async fn list_muscle_groups(&self) -> Result<Vec<MuscleGroup>> {
        MuscleGroupRepository::new(self.pool()).list().await
    }

    async fn insert_muscle_groups(&self, groups: &[NewMuscleGroup]) -> Result<u64> {
        MuscleGroupRepository::new(self.pool())
            .insert_many(groups)
            .await
    }
}

#[async_trait]
impl PreferencesStore for Database {
    async fn find_preferences(&self, user_id: i64) -> Result<Option<UserPreferences>> {
        PreferencesRepository::new(self.pool())
            .find_by_user(user_id)
            .await
    }

    async fn insert_preferences(&self, prefs: &UserPreferences) -> Result<UserPreferences> {
        PreferencesRepository::new(self.pool()).insert(prefs).await
    }

    async fn update_preferences(&self, prefs: &UserPreferences) -> Result<UserPreferences> {
        PreferencesRepository::new(self.pool()).update(prefs).await
    }

    async fn upsert_preferences(&self, prefs: &UserPreferences) -> Result<UserPreferences> {
        PreferencesRepository::new(self.pool()).upsert(prefs).await
    }
}
