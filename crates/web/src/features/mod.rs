use axum::Router;
use storage::Database;

use crate::middleware::auth::ApiKeys;

pub mod muscle_groups;
pub mod preferences;

pub fn router(db: Database, api_keys: ApiKeys) -> Router {
    let api = Router::new()
        .nest("/muscle-groups", muscle_groups::routes::routes())
        .nest("/preferences", preferences::routes::option_routes())
        .nest("/users", preferences::routes::routes(api_keys));

    Router::new().nest("/api", api).with_state(db)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use storage::services::muscle_group_seed::{PREDEFINED_MUSCLE_GROUPS, ensure_seeded};
    use tower::ServiceExt;

    use super::*;

    const KEY: &str = "test-key";

    async fn app() -> Router {
        let db = Database::in_memory().await.unwrap();
        ensure_seeded(&db).await.unwrap();
        router(db, ApiKeys::from_comma_separated(KEY))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn write(method: &str, uri: &str, body: Value, key: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(key) = key {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn prefs_body(rest: i32, unit: &str) -> Value {
        json!({
            "default_rest_time": rest,
            "weight_unit": unit,
            "auto_video_play": false,
            "video_quality": "SD",
            "notifications_enabled": true,
            "dark_mode": true,
            "keep_screen_on": false
        })
    }

    #[tokio::test]
    async fn test_lists_seeded_muscle_groups() {
        let app = app().await;

        let (status, body) = send(&app, get("/api/muscle-groups")).await;
        assert_eq!(status, StatusCode::OK);
        let groups = body.as_array().unwrap();
        assert_eq!(groups.len(), PREDEFINED_MUSCLE_GROUPS.len());
        assert_eq!(groups[0]["name"], "Chest");

        let id = groups[1]["muscle_group_id"].as_i64().unwrap();
        let (status, body) = send(&app, get(&format!("/api/muscle-groups/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Back");

        let (status, _) = send(&app, get("/api/muscle-groups/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsaved_user_gets_defaults() {
        let app = app().await;

        let (status, body) = send(&app, get("/api/users/1/preferences")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["persisted"], false);
        assert_eq!(body["default_rest_time"], 90);
        assert_eq!(body["weight_unit"], "kg");
        assert_eq!(body["video_quality"], "HD");
    }

    #[tokio::test]
    async fn test_create_update_and_upsert() {
        let app = app().await;
        let uri = "/api/users/2/preferences";

        let (status, body) = send(&app, write("PUT", uri, prefs_body(60, "kg"), Some(KEY))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

        let (status, body) =
            send(&app, write("POST", uri, prefs_body(60, "lbs"), Some(KEY))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["weight_unit"], "lbs");
        assert_eq!(body["persisted"], true);

        let (status, _) = send(&app, write("POST", uri, prefs_body(60, "lbs"), Some(KEY))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, write("PUT", uri, prefs_body(120, "kg"), Some(KEY))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["default_rest_time"], 120);

        let (status, body) = send(
            &app,
            write("PUT", "/api/users/3/preferences/upsert", prefs_body(30, "kg"), Some(KEY)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["default_rest_time"], 30);

        let (_, body) = send(&app, get(uri)).await;
        assert_eq!(body["persisted"], true);
        assert_eq!(body["default_rest_time"], 120);
    }

    #[tokio::test]
    async fn test_writes_require_api_key() {
        let app = app().await;
        let uri = "/api/users/4/preferences";

        let (status, _) = send(&app, write("POST", uri, prefs_body(60, "kg"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, write("POST", uri, prefs_body(60, "kg"), Some("nope"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (_, body) = send(&app, get(uri)).await;
        assert_eq!(body["persisted"], false);
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected_before_storage() {
        let app = app().await;
        let uri = "/api/users/5/preferences";

        let (status, body) =
            send(&app, write("POST", uri, prefs_body(500, "stone"), Some(KEY))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);

        let (_, body) = send(&app, get(uri)).await;
        assert_eq!(body["persisted"], false);

        let (status, _) = send(&app, get("/api/users/0/preferences")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_options_list_allowed_values() {
        let app = app().await;

        let (status, body) = send(&app, get("/api/preferences/options")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weight_units"], json!(["kg", "lbs"]));
        assert_eq!(body["video_qualities"], json!(["SD", "HD", "FHD"]));
        assert_eq!(body["default_rest_time"], 90);
    }
}
