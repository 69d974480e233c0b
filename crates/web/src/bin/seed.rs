use anyhow::Context;
use clap::Parser;
use storage::{
    Database,
    repository::muscle_group::MuscleGroupRepository,
    services::muscle_group_seed::{self, SeedOutcome},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Creates the database schema and the predefined muscle group catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://gym_tracker.db")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("seed={},storage={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&cli.database_url)
        .await
        .context("Failed to open database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    match muscle_group_seed::ensure_seeded(&db)
        .await
        .context("Failed to seed muscle groups")?
    {
        SeedOutcome::Seeded { inserted } => {
            tracing::info!("Inserted {} predefined muscle groups", inserted)
        }
        SeedOutcome::AlreadySeeded { existing } => {
            tracing::info!(
                "Muscle groups already present ({} rows), nothing to do",
                existing
            )
        }
    }

    let total = MuscleGroupRepository::new(db.pool())
        .count()
        .await
        .context("Failed to count muscle groups")?;
    tracing::info!("Catalog holds {} muscle groups", total);

    Ok(())
}
