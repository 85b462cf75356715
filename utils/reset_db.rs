use anyhow::Context;
use sea_orm::{ConnectionTrait, Database, DbBackend, Statement};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let db = Database::connect(database_url)
        .await
        .context("failed to connect to database")?;

    // Movies first: they hold the foreign key into categories.
    for table in ["movies", "categories", "seaql_migrations"] {
        db.execute(Statement::from_string(
            DbBackend::Postgres,
            format!("DROP TABLE IF EXISTS \"{table}\" CASCADE;"),
        ))
        .await
        .with_context(|| format!("failed to drop {table}"))?;
    }

    println!("Database reset successfully");
    Ok(())
}
