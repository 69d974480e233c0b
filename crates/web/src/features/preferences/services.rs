use sqlx::SqlitePool;
use storage::{
    dto::preferences::{PreferencesRequest, PreferencesResponse},
    error::Result,
    models::UserPreferences,
    repository::preferences::PreferencesRepository,
};

/// Get a user's preferences, falling back to the defaults when none were saved
pub async fn get_preferences(pool: &SqlitePool, user_id: i64) -> Result<PreferencesResponse> {
    let repo = PreferencesRepository::new(pool);

    let response = match repo.find_by_user(user_id).await? {
        Some(prefs) => PreferencesResponse::new(prefs, true),
        None => PreferencesResponse::new(UserPreferences::defaults_for(user_id), false),
    };

    Ok(response)
}

/// Create a user's preferences
pub async fn create_preferences(
    pool: &SqlitePool,
    user_id: i64,
    request: PreferencesRequest,
) -> Result<UserPreferences> {
    let repo = PreferencesRepository::new(pool);
    repo.insert(&request.into_preferences(user_id)).await
}

/// Update a user's existing preferences
pub async fn update_preferences(
    pool: &SqlitePool,
    user_id: i64,
    request: PreferencesRequest,
) -> Result<UserPreferences> {
    let repo = PreferencesRepository::new(pool);
    repo.update(&request.into_preferences(user_id)).await
}

/// Create or overwrite a user's preferences
pub async fn upsert_preferences(
    pool: &SqlitePool,
    user_id: i64,
    request: PreferencesRequest,
) -> Result<UserPreferences> {
    let repo = PreferencesRepository::new(pool);
    repo.upsert(&request.into_preferences(user_id)).await
}
