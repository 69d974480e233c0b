use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::UserPreferences;
use crate::models::preferences::{
    self, DEFAULT_REST_TIME, DEFAULT_VIDEO_QUALITY, DEFAULT_WEIGHT_UNIT, REST_TIME_OPTIONS,
    VIDEO_QUALITIES, WEIGHT_UNITS,
};

/// Request payload used to create, update or upsert a user's preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PreferencesRequest {
    #[validate(range(
        min = 1,
        max = 300,
        message = "Rest time must be between 1 and 300 seconds"
    ))]
    pub default_rest_time: i32,

    #[validate(custom(function = "validate_weight_unit"))]
    pub weight_unit: String,

    pub auto_video_play: bool,

    #[validate(custom(function = "validate_video_quality"))]
    pub video_quality: String,

    pub notifications_enabled: bool,

    pub dark_mode: bool,

    pub keep_screen_on: bool,
}

impl PreferencesRequest {
    pub fn into_preferences(self, user_id: i64) -> UserPreferences {
        UserPreferences {
            user_id,
            default_rest_time: self.default_rest_time,
            weight_unit: self.weight_unit,
            auto_video_play: self.auto_video_play,
            video_quality: self.video_quality,
            notifications_enabled: self.notifications_enabled,
            dark_mode: self.dark_mode,
            keep_screen_on: self.keep_screen_on,
        }
    }
}

/// A user's preferences, or the defaults when nothing has been saved yet
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferencesResponse {
    pub user_id: i64,
    pub default_rest_time: i32,
    pub weight_unit: String,
    pub auto_video_play: bool,
    pub video_quality: String,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    pub keep_screen_on: bool,
    /// `false` when the values are defaults and no record exists
    pub persisted: bool,
}

impl PreferencesResponse {
    pub fn new(prefs: UserPreferences, persisted: bool) -> Self {
        Self {
            user_id: prefs.user_id,
            default_rest_time: prefs.default_rest_time,
            weight_unit: prefs.weight_unit,
            auto_video_play: prefs.auto_video_play,
            video_quality: prefs.video_quality,
            notifications_enabled: prefs.notifications_enabled,
            dark_mode: prefs.dark_mode,
            keep_screen_on: prefs.keep_screen_on,
            persisted,
        }
    }
}

/// The fixed option lists a settings form offers
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PreferencesOptionsResponse {
    pub weight_units: Vec<String>,
    pub video_qualities: Vec<String>,
    pub rest_time_options: Vec<i32>,
    pub default_rest_time: i32,
    pub default_weight_unit: String,
    pub default_video_quality: String,
}

impl Default for PreferencesOptionsResponse {
    fn default() -> Self {
        Self {
            weight_units: WEIGHT_UNITS.iter().map(|u| u.to_string()).collect(),
            video_qualities: VIDEO_QUALITIES.iter().map(|q| q.to_string()).collect(),
            rest_time_options: REST_TIME_OPTIONS.to_vec(),
            default_rest_time: DEFAULT_REST_TIME,
            default_weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
            default_video_quality: DEFAULT_VIDEO_QUALITY.to_string(),
        }
    }
}

// Validation helpers
fn validate_weight_unit(unit: &str) -> Result<(), validator::ValidationError> {
    preferences::validate_weight_unit(unit)
}

fn validate_video_quality(quality: &str) -> Result<(), validator::ValidationError> {
    preferences::validate_video_quality(quality)
}
