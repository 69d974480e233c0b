use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{
    create_preferences, get_options, get_preferences, update_preferences, upsert_preferences,
};
use crate::middleware::auth::{ApiKeys, require_auth};

/// Routes nested under `/api/users`
pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:user_id/preferences", post(create_preferences))
        .route("/:user_id/preferences", put(update_preferences))
        .route("/:user_id/preferences/upsert", put(upsert_preferences))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/:user_id/preferences", get(get_preferences))
        .merge(protected)
}

/// Routes nested under `/api/preferences`
pub fn option_routes() -> Router<Database> {
    Router::new().route("/options", get(get_options))
}
