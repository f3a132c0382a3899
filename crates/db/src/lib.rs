pub mod person;

use dossier_common::error::{DossierError, DossierResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> DossierResult<PgPool> {
    tracing::info!("connecting to database");
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| DossierError::Database(e.to_string()))
}

/// Create the persons table if it does not exist yet.
///
/// Runs at startup so a fresh database is usable without a separate
/// migration step. Safe to call repeatedly.
pub async fn ensure_schema(pool: &PgPool) -> DossierResult<()> {
    tracing::info!("ensuring database schema");
    sqlx::query(
        "create table if not exists persons (
          id uuid primary key,
          name text not null,
          surname text not null,
          patronymic text not null,
          age integer not null default 0,
          gender text not null default '',
          nationality text not null default ''
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| DossierError::Database(e.to_string()))?;

    Ok(())
}
