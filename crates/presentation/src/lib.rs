//! State holders for the settings and muscle group screens.
//!
//! A state holder is owned by one screen and dropped with it. The UI sends
//! events in and reads immutable snapshots out of a `watch` channel.

pub mod muscle_groups;
pub mod preferences;
pub mod resource;

pub use muscle_groups::{MuscleGroupsEvent, MuscleGroupsStateHolder, MuscleGroupsUiState};
pub use preferences::{PreferencesEvent, PreferencesStateHolder, PreferencesUiState};
pub use resource::Resource;
