use sqlx::SqlitePool;

use crate::error::{Result, StorageError};
use crate::models::UserPreferences;

const SELECT_COLUMNS: &str = "user_id, default_rest_time, weight_unit, auto_video_play, \
     video_quality, notifications_enabled, dark_mode, keep_screen_on";

/// Repository for per-user preferences
pub struct PreferencesRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PreferencesRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the preferences of a user, if any were ever saved
    pub async fn find_by_user(&self, user_id: i64) -> Result<Option<UserPreferences>> {
        let prefs = sqlx::query_as::<_, UserPreferences>(&format!(
            "SELECT {SELECT_COLUMNS} FROM user_preferences WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(prefs)
    }

    /// Insert a new record. Fails with a constraint violation if the user already has one.
    pub async fn insert(&self, prefs: &UserPreferences) -> Result<UserPreferences> {
        let inserted = sqlx::query_as::<_, UserPreferences>(&format!(
            r#"
            INSERT INTO user_preferences (
                user_id, default_rest_time, weight_unit, auto_video_play,
                video_quality, notifications_enabled, dark_mode, keep_screen_on
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(prefs.user_id)
        .bind(prefs.default_rest_time)
        .bind(&prefs.weight_unit)
        .bind(prefs.auto_video_play)
        .bind(&prefs.video_quality)
        .bind(prefs.notifications_enabled)
        .bind(prefs.dark_mode)
        .bind(prefs.keep_screen_on)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, prefs.user_id))?;

        Ok(inserted)
    }

    /// Update an existing record in place
    pub async fn update(&self, prefs: &UserPreferences) -> Result<UserPreferences> {
        let updated = sqlx::query_as::<_, UserPreferences>(&format!(
            r#"
            UPDATE user_preferences
            SET default_rest_time = ?,
                weight_unit = ?,
                auto_video_play = ?,
                video_quality = ?,
                notifications_enabled = ?,
                dark_mode = ?,
                keep_screen_on = ?
            WHERE user_id = ?
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(prefs.default_rest_time)
        .bind(&prefs.weight_unit)
        .bind(prefs.auto_video_play)
        .bind(&prefs.video_quality)
        .bind(prefs.notifications_enabled)
        .bind(prefs.dark_mode)
        .bind(prefs.keep_screen_on)
        .bind(prefs.user_id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_write_error(e, prefs.user_id))?
        .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    /// Insert the record, or overwrite it when the user already has one
    pub async fn upsert(&self, prefs: &UserPreferences) -> Result<UserPreferences> {
        let saved = sqlx::query_as::<_, UserPreferences>(&format!(
            r#"
            INSERT INTO user_preferences (
                user_id, default_rest_time, weight_unit, auto_video_play,
                video_quality, notifications_enabled, dark_mode, keep_screen_on
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id)
            DO UPDATE SET
                default_rest_time = excluded.default_rest_time,
                weight_unit = excluded.weight_unit,
                auto_video_play = excluded.auto_video_play,
                video_quality = excluded.video_quality,
                notifications_enabled = excluded.notifications_enabled,
                dark_mode = excluded.dark_mode,
                keep_screen_on = excluded.keep_screen_on
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(prefs.user_id)
        .bind(prefs.default_rest_time)
        .bind(&prefs.weight_unit)
        .bind(prefs.auto_video_play)
        .bind(&prefs.video_quality)
        .bind(prefs.notifications_enabled)
        .bind(prefs.dark_mode)
        .bind(prefs.keep_screen_on)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_write_error(e, prefs.user_id))?;

        Ok(saved)
    }
}

fn map_write_error(error: sqlx::Error, user_id: i64) -> StorageError {
    let error = StorageError::from(error);
    if error.is_unique_violation() {
        StorageError::ConstraintViolation(format!(
            "Preferences for user {} already exist",
            user_id
        ))
    } else if error.is_check_violation() {
        StorageError::OutOfRange(format!(
            "Preferences for user {} are out of range",
            user_id
        ))
    } else {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn custom(user_id: i64) -> UserPreferences {
        UserPreferences {
            user_id,
            default_rest_time: 45,
            weight_unit: "lbs".to_string(),
            auto_video_play: false,
            video_quality: "SD".to_string(),
            notifications_enabled: false,
            dark_mode: true,
            keep_screen_on: false,
        }
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        assert_eq!(repo.find_by_user(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        let inserted = repo.insert(&custom(1)).await.unwrap();
        assert_eq!(inserted, custom(1));
        assert_eq!(repo.find_by_user(1).await.unwrap(), Some(custom(1)));
    }

    #[tokio::test]
    async fn test_second_insert_is_a_constraint_violation() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        repo.insert(&UserPreferences::defaults_for(1)).await.unwrap();
        let result = repo.insert(&custom(1)).await;

        assert!(matches!(result, Err(StorageError::ConstraintViolation(_))));
        assert_eq!(
            repo.find_by_user(1).await.unwrap(),
            Some(UserPreferences::defaults_for(1))
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        assert!(matches!(
            repo.update(&custom(9)).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        repo.insert(&UserPreferences::defaults_for(2)).await.unwrap();
        let updated = repo.update(&custom(2)).await.unwrap();

        assert_eq!(updated, custom(2));
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        let first = repo.upsert(&UserPreferences::defaults_for(5)).await.unwrap();
        assert_eq!(first, UserPreferences::defaults_for(5));

        let second = repo.upsert(&custom(5)).await.unwrap();
        assert_eq!(second, custom(5));
        assert_eq!(repo.find_by_user(5).await.unwrap(), Some(custom(5)));
    }

    #[tokio::test]
    async fn test_schema_rejects_out_of_range_rest_time() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());

        let mut prefs = UserPreferences::defaults_for(3);
        prefs.default_rest_time = 301;

        assert!(matches!(
            repo.insert(&prefs).await,
            Err(StorageError::OutOfRange(_))
        ));
    }

    #[tokio::test]
    async fn test_schema_rejects_unknown_weight_unit_on_update() {
        let db = Database::in_memory().await.unwrap();
        let repo = PreferencesRepository::new(db.pool());
        repo.insert(&UserPreferences::defaults_for(4)).await.unwrap();

        let mut prefs = UserPreferences::defaults_for(4);
        prefs.weight_unit = "stone".to_string();

        assert!(matches!(
            repo.update(&prefs).await,
            Err(StorageError::OutOfRange(_))
        ));
        assert_eq!(
            repo.find_by_user(4).await.unwrap(),
            Some(UserPreferences::defaults_for(4))
        );
    }
}
