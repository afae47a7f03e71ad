//! PostgreSQL schema migrations for geostuff storage.
//!
//! Every statement is guarded (`IF NOT EXISTS`), so running the migrations
//! against an initialised database is a no-op. The whole run holds a
//! transaction-scoped advisory lock so concurrent starters do not race on
//! `CREATE EXTENSION`.

use anyhow::Result;
use sqlx::PgPool;

const MIGRATION_LOCK_KEY: i64 = 0x6765_6f73_7475_6666; // "geostuff"

/// Create the PostGIS extension, the `cities` table and its spatial index.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query("CREATE EXTENSION IF NOT EXISTS postgis").execute(&mut *tx).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            point_id SERIAL PRIMARY KEY,
            location VARCHAR(30) NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            geo geometry(POINT)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cities_geo ON cities USING GIST (geo)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("PostgreSQL migrations completed");
    Ok(())
}
