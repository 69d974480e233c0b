use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use storage::models::UserPreferences;
use storage::models::preferences::{
    validate_rest_time, validate_video_quality, validate_weight_unit, validation_message,
};
use storage::store::PreferencesStore;
use tokio::sync::watch;
use tracing::{debug, info};

use super::event::PreferencesEvent;
use super::state::{PreferencesUiState, SavePath};
use crate::resource::Resource;

pub const NO_USER_MESSAGE: &str = "No user is signed in";
pub const NOT_LOADED_MESSAGE: &str = "Preferences are not loaded yet";
pub const SAVED_MESSAGE: &str = "Preferences saved";
pub const RESET_MESSAGE: &str = "Preferences reset to defaults";

/// Owns the preferences draft of one settings screen.
///
/// Loads and logouts advance a generation counter; a store result is only
/// reduced into the state if no newer load or logout started meanwhile.
/// A save requested while another one is pending is ignored, and nothing is
/// written until a load for the current user has succeeded.
pub struct PreferencesStateHolder {
    store: Arc<dyn PreferencesStore>,
    state: watch::Sender<PreferencesUiState>,
    generation: AtomicU64,
    save_seq: AtomicU64,
}

enum SaveStart {
    Started {
        prefs: UserPreferences,
        path: SavePath,
        creates: bool,
        revision: u64,
        token: u64,
    },
    Busy,
    Rejected(&'static str),
}

impl PreferencesStateHolder {
    pub fn new(store: Arc<dyn PreferencesStore>) -> Self {
        let (state, _) = watch::channel(PreferencesUiState::default());
        Self {
            store,
            state,
            generation: AtomicU64::new(0),
            save_seq: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PreferencesUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PreferencesUiState {
        self.state.borrow().clone()
    }

    pub async fn on_event(&self, event: PreferencesEvent) {
        match event {
            PreferencesEvent::Load { user_id } => self.load(user_id).await,
            PreferencesEvent::RestTimeChanged(seconds) => self.set_rest_time(seconds),
            PreferencesEvent::WeightUnitChanged(unit) => self.set_weight_unit(&unit),
            PreferencesEvent::VideoQualityChanged(quality) => self.set_video_quality(&quality),
            PreferencesEvent::AutoVideoPlayToggled(on) => self.set_auto_video_play(on),
            PreferencesEvent::NotificationsToggled(on) => self.set_notifications_enabled(on),
            PreferencesEvent::DarkModeToggled(on) => self.set_dark_mode(on),
            PreferencesEvent::KeepScreenOnToggled(on) => self.set_keep_screen_on(on),
            PreferencesEvent::Save => self.save().await,
            PreferencesEvent::SaveAll => self.save_all().await,
            PreferencesEvent::ResetToDefaults => self.reset_to_defaults(),
            PreferencesEvent::Logout => self.logout(),
            PreferencesEvent::DismissError => self.dismiss_error(),
            PreferencesEvent::DismissMessage => self.dismiss_message(),
        }
    }

    /// Load the persisted record of `user_id`, or show defaults when none exists.
    pub async fn load(&self, user_id: i64) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.state.send_modify(|s| {
            if s.user_id != Some(user_id) {
                // the previous user's draft must never be saved under a new id
                let revision = s.revision;
                *s = PreferencesUiState {
                    user_id: Some(user_id),
                    revision,
                    ..PreferencesUiState::default()
                };
            }
            reduce_load(s, Resource::Pending);
        });

        let outcome: Resource<Option<UserPreferences>> =
            self.store.find_preferences(user_id).await.into();

        let applied = self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            reduce_load(s, outcome);
            true
        });

        if !applied {
            debug!("Discarding stale preferences result for user {}", user_id);
        }
    }

    pub fn set_rest_time(&self, seconds: i32) {
        self.edit(|s| {
            validate_rest_time(seconds).map_err(|e| validation_message(&e))?;
            s.default_rest_time = seconds;
            Ok(())
        });
    }

    pub fn set_weight_unit(&self, unit: &str) {
        self.edit(|s| {
            validate_weight_unit(unit).map_err(|e| validation_message(&e))?;
            s.weight_unit = unit.to_string();
            Ok(())
        });
    }

    pub fn set_video_quality(&self, quality: &str) {
        self.edit(|s| {
            validate_video_quality(quality).map_err(|e| validation_message(&e))?;
            s.video_quality = quality.to_string();
            Ok(())
        });
    }

    pub fn set_auto_video_play(&self, on: bool) {
        self.edit(|s| {
            s.auto_video_play = on;
            Ok(())
        });
    }

    pub fn set_notifications_enabled(&self, on: bool) {
        self.edit(|s| {
            s.notifications_enabled = on;
            Ok(())
        });
    }

    pub fn set_dark_mode(&self, on: bool) {
        self.edit(|s| {
            s.dark_mode = on;
            Ok(())
        });
    }

    pub fn set_keep_screen_on(&self, on: bool) {
        self.edit(|s| {
            s.keep_screen_on = on;
            Ok(())
        });
    }

    /// Persist the draft: insert when no record is known yet, update otherwise.
    pub async fn save(&self) {
        self.persist(false).await;
    }

    /// Persist the draft with a single insert-or-update.
    pub async fn save_all(&self) {
        self.persist(true).await;
    }

    /// Overwrite the draft with the defaults. Nothing is written until the next save.
    pub fn reset_to_defaults(&self) {
        self.state.send_modify(|s| {
            s.apply_default_fields();
            s.mark_dirty();
            s.success_message = Some(RESET_MESSAGE.to_string());
        });
    }

    /// Drop everything user specific. In-flight results are discarded.
    pub fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(PreferencesUiState::default());
        info!("Preferences state cleared on logout");
    }

    pub fn dismiss_error(&self) {
        self.state.send_modify(|s| {
            s.error_message = None;
            s.validation_error = None;
        });
    }

    pub fn dismiss_message(&self) {
        self.state.send_modify(|s| s.success_message = None);
    }

    fn edit<F>(&self, apply: F)
    where
        F: FnOnce(&mut PreferencesUiState) -> Result<(), String>,
    {
        self.state.send_modify(|s| match apply(s) {
            Ok(()) => s.mark_dirty(),
            Err(message) => s.validation_error = Some(message),
        });
    }

    async fn persist(&self, upsert: bool) {
        let generation = self.generation.load(Ordering::SeqCst);
        let mut start = SaveStart::Busy;

        self.state.send_if_modified(|s| {
            if s.is_saving {
                return false;
            }
            let Some(prefs) = s.to_preferences() else {
                s.error_message = Some(NO_USER_MESSAGE.to_string());
                s.success_message = None;
                start = SaveStart::Rejected("no user resolved");
                return true;
            };
            if !s.is_loaded {
                s.error_message = Some(NOT_LOADED_MESSAGE.to_string());
                s.success_message = None;
                start = SaveStart::Rejected("preferences not loaded");
                return true;
            }
            if let Err(e) = prefs.check() {
                s.validation_error = Some(validation_message(&e));
                start = SaveStart::Rejected("draft out of range");
                return true;
            }
            let path = if upsert {
                SavePath::Upsert
            } else if s.has_persisted_record {
                SavePath::Update
            } else {
                SavePath::Insert
            };
            let creates = !s.has_persisted_record && path != SavePath::Update;
            let revision = s.revision;
            let token = self.save_seq.fetch_add(1, Ordering::SeqCst) + 1;
            reduce_save(s, creates, revision, Resource::Pending);
            start = SaveStart::Started {
                prefs,
                path,
                creates,
                revision,
                token,
            };
            true
        });

        let (prefs, path, creates, revision, token) = match start {
            SaveStart::Started {
                prefs,
                path,
                creates,
                revision,
                token,
            } => (prefs, path, creates, revision, token),
            SaveStart::Busy => {
                debug!("Save ignored, another save is still pending");
                return;
            }
            SaveStart::Rejected(reason) => {
                debug!("Save rejected, {}", reason);
                return;
            }
        };

        let result = match path {
            SavePath::Insert => self.store.insert_preferences(&prefs).await,
            SavePath::Update => self.store.update_preferences(&prefs).await,
            SavePath::Upsert => self.store.upsert_preferences(&prefs).await,
        };
        let outcome: Resource<UserPreferences> = result.into();

        let applied = self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                if self.save_seq.load(Ordering::SeqCst) == token && s.is_saving {
                    s.is_saving = false;
                    return true;
                }
                return false;
            }
            reduce_save(s, creates, revision, outcome);
            true
        });

        if applied {
            info!("Preferences for user {} saved via {:?}", prefs.user_id, path);
        }
    }
}

fn reduce_load(state: &mut PreferencesUiState, outcome: Resource<Option<UserPreferences>>) {
    match outcome {
        Resource::Pending => {
            state.is_loading = true;
            state.is_loaded = false;
            state.error_message = None;
        }
        Resource::Succeeded(Some(prefs)) => {
            state.is_loading = false;
            state.is_loaded = true;
            state.apply_fields(&prefs);
            state.has_persisted_record = true;
            state.has_unsaved_changes = false;
            state.validation_error = None;
        }
        Resource::Succeeded(None) => {
            state.is_loading = false;
            state.is_loaded = true;
            state.apply_default_fields();
            state.has_persisted_record = false;
            state.has_unsaved_changes = false;
            state.validation_error = None;
        }
        Resource::Failed(message) => {
            state.is_loading = false;
            state.error_message = Some(message);
        }
    }
}

/// `creates` is whether the write brings a new record into existence.
/// `revision` is the draft revision the save was started from; edits made
/// while the write was in flight keep the draft dirty.
fn reduce_save(
    state: &mut PreferencesUiState,
    creates: bool,
    revision: u64,
    outcome: Resource<UserPreferences>,
) {
    match outcome {
        Resource::Pending => {
            state.is_saving = true;
            state.is_created = false;
            state.is_updated = false;
            state.error_message = None;
            state.success_message = None;
        }
        Resource::Succeeded(_) => {
            state.is_saving = false;
            state.has_persisted_record = true;
            state.is_created = creates;
            state.is_updated = !creates;
            if state.revision == revision {
                state.has_unsaved_changes = false;
            }
            state.success_message = Some(SAVED_MESSAGE.to_string());
        }
        Resource::Failed(message) => {
            state.is_saving = false;
            state.error_message = Some(message);
        }
    }
}
