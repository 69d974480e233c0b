pub mod muscle_group;
pub mod preferences;
