use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{get_muscle_group, list_muscle_groups};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_muscle_groups))
        .route("/:id", get(get_muscle_group))
}
