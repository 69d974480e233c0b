use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::ValidationError;

pub const MIN_REST_TIME: i32 = 1;
pub const MAX_REST_TIME: i32 = 300;

pub const WEIGHT_UNITS: &[&str] = &["kg", "lbs"];
pub const VIDEO_QUALITIES: &[&str] = &["SD", "HD", "FHD"];
pub const REST_TIME_OPTIONS: &[i32] = &[30, 45, 60, 90, 120, 150, 180, 240, 300];

pub const DEFAULT_REST_TIME: i32 = 90;
pub const DEFAULT_WEIGHT_UNIT: &str = "kg";
pub const DEFAULT_AUTO_VIDEO_PLAY: bool = true;
pub const DEFAULT_VIDEO_QUALITY: &str = "HD";
pub const DEFAULT_NOTIFICATIONS_ENABLED: bool = true;
pub const DEFAULT_DARK_MODE: bool = false;
pub const DEFAULT_KEEP_SCREEN_ON: bool = true;

/// Per-user preferences. One record per user, keyed by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserPreferences {
    pub user_id: i64,
    /// Seconds suggested between sets.
    pub default_rest_time: i32,
    pub weight_unit: String,
    pub auto_video_play: bool,
    pub video_quality: String,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    pub keep_screen_on: bool,
}

impl UserPreferences {
    /// The values shown to a user who never saved preferences.
    pub fn defaults_for(user_id: i64) -> Self {
        Self {
            user_id,
            default_rest_time: DEFAULT_REST_TIME,
            weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
            auto_video_play: DEFAULT_AUTO_VIDEO_PLAY,
            video_quality: DEFAULT_VIDEO_QUALITY.to_string(),
            notifications_enabled: DEFAULT_NOTIFICATIONS_ENABLED,
            dark_mode: DEFAULT_DARK_MODE,
            keep_screen_on: DEFAULT_KEEP_SCREEN_ON,
        }
    }

    /// Checks every field against its allowed set or bound.
    pub fn check(&self) -> Result<(), ValidationError> {
        validate_rest_time(self.default_rest_time)?;
        validate_weight_unit(&self.weight_unit)?;
        validate_video_quality(&self.video_quality)?;
        Ok(())
    }
}

pub fn validate_rest_time(seconds: i32) -> Result<(), ValidationError> {
    if (MIN_REST_TIME..=MAX_REST_TIME).contains(&seconds) {
        Ok(())
    } else {
        Err(rejected(
            "invalid_rest_time",
            format!(
                "Rest time must be between {} and {} seconds",
                MIN_REST_TIME, MAX_REST_TIME
            ),
        ))
    }
}

pub fn validate_weight_unit(unit: &str) -> Result<(), ValidationError> {
    if WEIGHT_UNITS.contains(&unit) {
        Ok(())
    } else {
        Err(rejected(
            "invalid_weight_unit",
            format!("Weight unit must be one of: {}", WEIGHT_UNITS.join(", ")),
        ))
    }
}

pub fn validate_video_quality(quality: &str) -> Result<(), ValidationError> {
    if VIDEO_QUALITIES.contains(&quality) {
        Ok(())
    } else {
        Err(rejected(
            "invalid_video_quality",
            format!(
                "Video quality must be one of: {}",
                VIDEO_QUALITIES.join(", ")
            ),
        ))
    }
}

fn rejected(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

/// Human readable message carried by a validation error, falling back to its code.
pub fn validation_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_tuple() {
        let prefs = UserPreferences::defaults_for(7);
        assert_eq!(prefs.user_id, 7);
        assert_eq!(prefs.default_rest_time, 90);
        assert_eq!(prefs.weight_unit, "kg");
        assert!(prefs.auto_video_play);
        assert_eq!(prefs.video_quality, "HD");
        assert!(prefs.notifications_enabled);
        assert!(!prefs.dark_mode);
        assert!(prefs.keep_screen_on);
        assert!(prefs.check().is_ok());
    }

    #[test]
    fn test_rest_time_bounds() {
        assert!(validate_rest_time(1).is_ok());
        assert!(validate_rest_time(300).is_ok());
        assert!(validate_rest_time(0).is_err());
        assert!(validate_rest_time(301).is_err());
        assert!(validate_rest_time(-5).is_err());
    }

    #[test]
    fn test_weight_unit_and_quality_sets() {
        assert!(validate_weight_unit("kg").is_ok());
        assert!(validate_weight_unit("lbs").is_ok());
        assert!(validate_weight_unit("KG").is_err());
        assert!(validate_weight_unit("stone").is_err());

        assert!(validate_video_quality("FHD").is_ok());
        assert!(validate_video_quality("4K").is_err());
    }

    #[test]
    fn test_validation_message_is_readable() {
        let err = validate_rest_time(500).unwrap_err();
        assert_eq!(
            validation_message(&err),
            "Rest time must be between 1 and 300 seconds"
        );
    }

    #[test]
    fn test_rest_time_options_are_within_bounds() {
        for seconds in REST_TIME_OPTIONS {
            assert!(validate_rest_time(*seconds).is_ok());
        }
    }
}
