use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use storage::models::MuscleGroup;
use storage::services::muscle_group_seed::{self, SeedOutcome};
use storage::store::MuscleGroupStore;
use tokio::sync::{OnceCell, watch};
use tracing::{debug, warn};

use super::state::{MuscleGroupsEvent, MuscleGroupsUiState};
use crate::resource::Resource;

/// Owns the muscle group list of one screen.
pub struct MuscleGroupsStateHolder {
    store: Arc<dyn MuscleGroupStore>,
    state: watch::Sender<MuscleGroupsUiState>,
    generation: AtomicU64,
    /// Outcome of the one bootstrap this holder runs. Overlapping loads await it.
    bootstrap: OnceCell<Result<SeedOutcome, String>>,
}

impl MuscleGroupsStateHolder {
    pub fn new(store: Arc<dyn MuscleGroupStore>) -> Self {
        let (state, _) = watch::channel(MuscleGroupsUiState::default());
        Self {
            store,
            state,
            generation: AtomicU64::new(0),
            bootstrap: OnceCell::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MuscleGroupsUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MuscleGroupsUiState {
        self.state.borrow().clone()
    }

    pub async fn on_event(&self, event: MuscleGroupsEvent) {
        match event {
            MuscleGroupsEvent::Load => self.load().await,
            MuscleGroupsEvent::QueryChanged(query) => self.set_query(query),
            MuscleGroupsEvent::DismissError => {
                self.state.send_modify(|s| s.error_message = None);
            }
        }
    }

    /// Seed the catalog on first load, then read the persisted groups.
    ///
    /// If the bootstrap check fails the catalog is treated as loaded and the
    /// failure is only surfaced; later loads go straight to the read.
    pub async fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let needs_bootstrap = !self.state.borrow().catalog_loaded;

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        if needs_bootstrap {
            match self.bootstrap().await {
                Ok(SeedOutcome::Seeded { inserted }) => {
                    debug!("Bootstrap inserted {} muscle groups", inserted);
                }
                Ok(SeedOutcome::AlreadySeeded { .. }) => {}
                Err(message) => {
                    let outcome = Resource::<Vec<MuscleGroup>>::failed(message);
                    self.apply(generation, outcome);
                    return;
                }
            }
        }

        let outcome: Resource<Vec<MuscleGroup>> = self.store.list_muscle_groups().await.into();
        self.apply(generation, outcome);
    }

    async fn bootstrap(&self) -> Result<SeedOutcome, String> {
        self.bootstrap
            .get_or_init(|| async {
                muscle_group_seed::ensure_seeded(self.store.as_ref())
                    .await
                    .map_err(|e| {
                        warn!("Muscle group bootstrap failed: {}", e);
                        e.to_string()
                    })
            })
            .await
            .clone()
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.query = query);
    }

    fn apply(&self, generation: u64, outcome: Resource<Vec<MuscleGroup>>) {
        let applied = self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match outcome {
                Resource::Pending => s.is_loading = true,
                Resource::Succeeded(groups) => {
                    s.is_loading = false;
                    s.catalog_loaded = true;
                    s.groups = groups;
                }
                Resource::Failed(message) => {
                    s.is_loading = false;
                    s.catalog_loaded = true;
                    s.error_message = Some(message);
                }
            }
            true
        });

        if !applied {
            debug!("Discarding stale muscle group result");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use storage::error::{Result, StorageError};
    use storage::models::NewMuscleGroup;
    use storage::services::muscle_group_seed::PREDEFINED_MUSCLE_GROUPS;

    use super::*;

    #[derive(Default)]
    struct MockStore {
        rows: Mutex<Vec<MuscleGroup>>,
        reads: Mutex<usize>,
        batches: Mutex<usize>,
        failing_reads: Mutex<usize>,
    }

    #[async_trait]
    impl MuscleGroupStore for MockStore {
        async fn list_muscle_groups(&self) -> Result<Vec<MuscleGroup>> {
            *self.reads.lock().unwrap() += 1;
            let mut failing = self.failing_reads.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                return Err(StorageError::NotFound);
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn insert_muscle_groups(&self, groups: &[NewMuscleGroup]) -> Result<u64> {
            *self.batches.lock().unwrap() += 1;
            let mut rows = self.rows.lock().unwrap();
            for group in groups {
                let id = rows.len() as i64 + 1;
                rows.push(MuscleGroup {
                    muscle_group_id: id,
                    name: group.name.clone(),
                    description: group.description.clone(),
                    icon: group.icon.clone(),
                });
            }
            Ok(groups.len() as u64)
        }
    }

    #[tokio::test]
    async fn test_first_load_seeds_and_second_load_only_reads() {
        let store = Arc::new(MockStore::default());
        let holder = MuscleGroupsStateHolder::new(store.clone());

        holder.load().await;
        let state = holder.state();
        assert!(state.catalog_loaded);
        assert!(!state.is_loading);
        assert_eq!(state.groups.len(), PREDEFINED_MUSCLE_GROUPS.len());

        holder.load().await;
        assert_eq!(*store.batches.lock().unwrap(), 1);
        // bootstrap read + list, then list only
        assert_eq!(*store.reads.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_bootstrap_failure_marks_catalog_loaded_without_retry() {
        let store = Arc::new(MockStore::default());
        *store.failing_reads.lock().unwrap() = 1;
        let holder = MuscleGroupsStateHolder::new(store.clone());

        holder.load().await;
        let state = holder.state();
        assert!(state.catalog_loaded);
        assert_eq!(state.error_message.as_deref(), Some("Not found"));
        assert!(state.groups.is_empty());
        assert_eq!(*store.batches.lock().unwrap(), 0);

        holder.on_event(MuscleGroupsEvent::DismissError).await;
        holder.on_event(MuscleGroupsEvent::Load).await;
        assert_eq!(*store.batches.lock().unwrap(), 0);
        assert!(holder.state().error_message.is_none());
    }

    #[tokio::test]
    async fn test_query_filters_case_insensitively() {
        let store = Arc::new(MockStore::default());
        let holder = MuscleGroupsStateHolder::new(store);

        holder.load().await;
        holder
            .on_event(MuscleGroupsEvent::QueryChanged("  CE ".to_string()))
            .await;

        let state = holder.state();
        let names: Vec<&str> = state
            .visible_groups()
            .iter()
            .map(|g| g.name.as_str())
            .collect();
        assert_eq!(names, vec!["Biceps", "Triceps", "Quadriceps"]);

        holder.set_query("");
        assert_eq!(
            holder.state().visible_groups().len(),
            PREDEFINED_MUSCLE_GROUPS.len()
        );
    }

    #[tokio::test]
    async fn test_overlapping_loads_bootstrap_once() {
        let store = Arc::new(MockStore::default());
        let holder = MuscleGroupsStateHolder::new(store.clone());

        tokio::join!(holder.load(), holder.load());

        let state = holder.state();
        assert!(state.error_message.is_none());
        assert_eq!(state.groups.len(), PREDEFINED_MUSCLE_GROUPS.len());
        assert_eq!(*store.batches.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_loads_against_sqlite() {
        let db = storage::Database::in_memory().await.unwrap();
        let holder = MuscleGroupsStateHolder::new(Arc::new(db));

        tokio::join!(holder.load(), holder.load(), holder.load());

        let state = holder.state();
        assert!(state.error_message.is_none(), "{:?}", state.error_message);
        assert!(state.catalog_loaded);
        assert!(!state.is_loading);
        assert_eq!(state.groups.len(), PREDEFINED_MUSCLE_GROUPS.len());
    }

    #[tokio::test]
    async fn test_loads_from_sqlite() {
        let db = storage::Database::in_memory().await.unwrap();
        let holder = MuscleGroupsStateHolder::new(Arc::new(db));

        holder.load().await;
        let state = holder.state();
        assert_eq!(state.groups.first().map(|g| g.name.as_str()), Some("Chest"));
        assert!(state.error_message.is_none());
    }
}
