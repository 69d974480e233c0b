pub mod muscle_group;
pub mod preferences;

pub use muscle_group::{MuscleGroup, NewMuscleGroup};
pub use preferences::UserPreferences;
