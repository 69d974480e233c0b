/// Everything the settings screen can ask of its state holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencesEvent {
    Load { user_id: i64 },
    RestTimeChanged(i32),
    WeightUnitChanged(String),
    VideoQualityChanged(String),
    AutoVideoPlayToggled(bool),
    NotificationsToggled(bool),
    DarkModeToggled(bool),
    KeepScreenOnToggled(bool),
    /// Insert the first time, update afterwards.
    Save,
    /// Insert-or-update in one call.
    SaveAll,
    ResetToDefaults,
    Logout,
    DismissError,
    DismissMessage,
}
