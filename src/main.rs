use anyhow::Context;
use clap::Parser;
use migration::{Migrator, MigratorTrait};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_catalog::config::Config;
use movie_catalog::routes::{create_routes, AppState};
use movie_catalog::store::{memory::InMemoryStore, postgres::PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let state = if config.in_memory {
        tracing::warn!("Using in-memory store; data is lost on restart");
        AppState::new(InMemoryStore::new())
    } else {
        let store = PostgresStore::connect(config.database_url()?)
            .await
            .context("failed to connect to database")?;
        tracing::info!("Database connection established");

        Migrator::up(store.connection(), None)
            .await
            .context("failed to run database migrations")?;
        tracing::info!("Database migrations applied");

        AppState::new(store)
    };
    tracing::info!(backend = state.store.backend_name(), "Catalog store ready");

    let app = create_routes(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
