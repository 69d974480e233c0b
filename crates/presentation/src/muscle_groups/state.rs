use storage::models::MuscleGroup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuscleGroupsEvent {
    Load,
    QueryChanged(String),
    DismissError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MuscleGroupsUiState {
    pub groups: Vec<MuscleGroup>,
    pub query: String,
    pub is_loading: bool,
    /// Set once the bootstrap check ran, whether or not it succeeded.
    pub catalog_loaded: bool,
    pub error_message: Option<String>,
}

impl MuscleGroupsUiState {
    /// Groups whose name contains the query, ignoring case, in catalog order.
    pub fn visible_groups(&self) -> Vec<&MuscleGroup> {
        let needle = self.query.trim().to_lowercase();
        self.groups
            .iter()
            .filter(|g| needle.is_empty() || g.name.to_lowercase().contains(&needle))
            .collect()
    }
}
