use storage::models::UserPreferences;
use storage::models::preferences::{
    DEFAULT_AUTO_VIDEO_PLAY, DEFAULT_DARK_MODE, DEFAULT_KEEP_SCREEN_ON,
    DEFAULT_NOTIFICATIONS_ENABLED, DEFAULT_REST_TIME, DEFAULT_VIDEO_QUALITY, DEFAULT_WEIGHT_UNIT,
    REST_TIME_OPTIONS, VIDEO_QUALITIES, WEIGHT_UNITS,
};

/// Which write a save resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePath {
    Insert,
    Update,
    Upsert,
}

/// Snapshot of the settings screen. Read-only for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesUiState {
    pub user_id: Option<i64>,

    pub default_rest_time: i32,
    pub weight_unit: String,
    pub auto_video_play: bool,
    pub video_quality: String,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    pub keep_screen_on: bool,

    pub weight_units: Vec<String>,
    pub video_qualities: Vec<String>,
    pub rest_time_options: Vec<i32>,

    pub is_loading: bool,
    pub is_loaded: bool,
    pub is_saving: bool,
    pub has_unsaved_changes: bool,
    /// A record exists in storage, so the next `Save` updates it.
    pub has_persisted_record: bool,
    pub is_created: bool,
    pub is_updated: bool,

    pub validation_error: Option<String>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    /// Bumped on every accepted edit.
    pub(crate) revision: u64,
}

impl Default for PreferencesUiState {
    fn default() -> Self {
        Self {
            user_id: None,
            default_rest_time: DEFAULT_REST_TIME,
            weight_unit: DEFAULT_WEIGHT_UNIT.to_string(),
            auto_video_play: DEFAULT_AUTO_VIDEO_PLAY,
            video_quality: DEFAULT_VIDEO_QUALITY.to_string(),
            notifications_enabled: DEFAULT_NOTIFICATIONS_ENABLED,
            dark_mode: DEFAULT_DARK_MODE,
            keep_screen_on: DEFAULT_KEEP_SCREEN_ON,
            weight_units: WEIGHT_UNITS.iter().map(|u| u.to_string()).collect(),
            video_qualities: VIDEO_QUALITIES.iter().map(|q| q.to_string()).collect(),
            rest_time_options: REST_TIME_OPTIONS.to_vec(),
            is_loading: false,
            is_loaded: false,
            is_saving: false,
            has_unsaved_changes: false,
            has_persisted_record: false,
            is_created: false,
            is_updated: false,
            validation_error: None,
            error_message: None,
            success_message: None,
            revision: 0,
        }
    }
}

impl PreferencesUiState {
    /// The draft as a record, if a user is resolved.
    pub fn to_preferences(&self) -> Option<UserPreferences> {
        let user_id = self.user_id?;
        Some(UserPreferences {
            user_id,
            default_rest_time: self.default_rest_time,
            weight_unit: self.weight_unit.clone(),
            auto_video_play: self.auto_video_play,
            video_quality: self.video_quality.clone(),
            notifications_enabled: self.notifications_enabled,
            dark_mode: self.dark_mode,
            keep_screen_on: self.keep_screen_on,
        })
    }

    pub(crate) fn apply_fields(&mut self, prefs: &UserPreferences) {
        self.default_rest_time = prefs.default_rest_time;
        self.weight_unit = prefs.weight_unit.clone();
        self.auto_video_play = prefs.auto_video_play;
        self.video_quality = prefs.video_quality.clone();
        self.notifications_enabled = prefs.notifications_enabled;
        self.dark_mode = prefs.dark_mode;
        self.keep_screen_on = prefs.keep_screen_on;
    }

    pub(crate) fn apply_default_fields(&mut self) {
        let defaults = UserPreferences::defaults_for(self.user_id.unwrap_or_default());
        self.apply_fields(&defaults);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.has_unsaved_changes = true;
        self.revision += 1;
        self.validation_error = None;
        self.error_message = None;
    }
}
