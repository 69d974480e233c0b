mod holder;
mod state;

pub use holder::MuscleGroupsStateHolder;
pub use state::{MuscleGroupsEvent, MuscleGroupsUiState};
