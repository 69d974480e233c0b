use std::time::Duration;

use anyhow::Context;
use storage::{Database, services::muscle_group_seed};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::muscle_groups::handlers::list_muscle_groups,
        features::muscle_groups::handlers::get_muscle_group,
        features::preferences::handlers::get_options,
        features::preferences::handlers::get_preferences,
        features::preferences::handlers::create_preferences,
        features::preferences::handlers::update_preferences,
        features::preferences::handlers::upsert_preferences,
    ),
    components(
        schemas(
            storage::dto::muscle_group::MuscleGroupResponse,
            storage::dto::preferences::PreferencesRequest,
            storage::dto::preferences::PreferencesResponse,
            storage::dto::preferences::PreferencesOptionsResponse,
            storage::models::MuscleGroup,
            storage::models::UserPreferences,
        )
    ),
    tags(
        (name = "muscle-groups", description = "Muscle group catalog"),
        (name = "preferences", description = "Per-user preferences"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting gym tracker API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Opening database at: {}", config.database_url);
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    match muscle_group_seed::ensure_seeded(&db).await {
        Ok(outcome) => tracing::info!("Muscle group catalog ready: {:?}", outcome),
        Err(e) => tracing::warn!("Muscle group bootstrap failed, continuing: {}", e),
    }

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = features::router(db, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
