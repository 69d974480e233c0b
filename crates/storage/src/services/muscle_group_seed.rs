use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::models::NewMuscleGroup;
use crate::store::MuscleGroupStore;

pub struct PredefinedMuscleGroup {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const PREDEFINED_MUSCLE_GROUPS: &[PredefinedMuscleGroup] = &[
    PredefinedMuscleGroup {
        name: "Chest",
        description: "Pectoralis major and minor",
        icon: "ic_chest",
    },
    PredefinedMuscleGroup {
        name: "Back",
        description: "Latissimus dorsi, trapezius and rhomboids",
        icon: "ic_back",
    },
    PredefinedMuscleGroup {
        name: "Shoulders",
        description: "Anterior, lateral and posterior deltoids",
        icon: "ic_shoulders",
    },
    PredefinedMuscleGroup {
        name: "Biceps",
        description: "Biceps brachii and brachialis",
        icon: "ic_biceps",
    },
    PredefinedMuscleGroup {
        name: "Triceps",
        description: "Triceps brachii, all three heads",
        icon: "ic_triceps",
    },
    PredefinedMuscleGroup {
        name: "Forearms",
        description: "Wrist flexors, extensors and brachioradialis",
        icon: "ic_forearms",
    },
    PredefinedMuscleGroup {
        name: "Abs",
        description: "Rectus abdominis and obliques",
        icon: "ic_abs",
    },
    PredefinedMuscleGroup {
        name: "Quadriceps",
        description: "Front of the thigh",
        icon: "ic_quadriceps",
    },
    PredefinedMuscleGroup {
        name: "Hamstrings",
        description: "Back of the thigh",
        icon: "ic_hamstrings",
    },
    PredefinedMuscleGroup {
        name: "Glutes",
        description: "Gluteus maximus, medius and minimus",
        icon: "ic_glutes",
    },
    PredefinedMuscleGroup {
        name: "Calves",
        description: "Gastrocnemius and soleus",
        icon: "ic_calves",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was empty and has now been written.
    Seeded { inserted: u64 },
    /// Muscle groups already existed; nothing was written.
    AlreadySeeded { existing: usize },
}

pub fn predefined_catalog() -> Vec<NewMuscleGroup> {
    PREDEFINED_MUSCLE_GROUPS
        .iter()
        .map(|g| NewMuscleGroup::new(g.name, g.description, g.icon))
        .collect()
}

/// Insert the predefined catalog if no muscle group is persisted yet.
///
/// The batch is all-or-nothing, so when a concurrent caller seeds first the
/// insert hits the unique name constraint and rolls back. That case is
/// reported as `AlreadySeeded`.
pub async fn ensure_seeded<S>(store: &S) -> Result<SeedOutcome>
where
    S: MuscleGroupStore + ?Sized,
{
    let existing = store.list_muscle_groups().await?;
    if !existing.is_empty() {
        return Ok(SeedOutcome::AlreadySeeded {
            existing: existing.len(),
        });
    }

    match store.insert_muscle_groups(&predefined_catalog()).await {
        Ok(inserted) => {
            info!("Seeded {} predefined muscle groups", inserted);
            Ok(SeedOutcome::Seeded { inserted })
        }
        Err(StorageError::ConstraintViolation(reason)) => {
            debug!("Catalog seeded concurrently ({}), keeping existing rows", reason);
            let existing = store.list_muscle_groups().await?;
            Ok(SeedOutcome::AlreadySeeded {
                existing: existing.len(),
            })
        }
        Err(e) => Err(e),
    }
}
