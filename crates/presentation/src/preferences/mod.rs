mod event;
mod holder;
mod state;

pub use event::PreferencesEvent;
pub use holder::PreferencesStateHolder;
pub use state::{PreferencesUiState, SavePath};
