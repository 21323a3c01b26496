//! Database module for Postgres persistence.
//!
//! Postgres is the source of truth for all update records. The pool is built
//! once at startup and handed to the handlers through shared state.

mod repository;

#[cfg(test)]
pub mod memory;

pub use repository::*;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(database_url: &str, ssl_mode: &str) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(database_url)?.ssl_mode(parse_ssl_mode(ssl_mode));

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Map the configured TLS trust mode onto the driver's connection option.
/// `require` encrypts without certificate verification, which is what the
/// hosted store expects.
fn parse_ssl_mode(mode: &str) -> PgSslMode {
    match mode {
        "disable" => PgSslMode::Disable,
        "allow" => PgSslMode::Allow,
        "prefer" => PgSslMode::Prefer,
        "verify-ca" => PgSslMode::VerifyCa,
        "verify-full" => PgSslMode::VerifyFull,
        _ => PgSslMode::Require,
    }
}

/// Run database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(
        r#"
        CREATE TABLE IF NOT EXISTS updates (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft' CHECK (status IN ('draft', 'published')),
            published_at TIMESTAMPTZ,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );

        CREATE INDEX IF NOT EXISTS idx_updates_created_at ON updates (created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_updates_published_at ON updates (published_at DESC)
            WHERE status = 'published';

        CREATE OR REPLACE FUNCTION updates_touch_updated_at() RETURNS trigger AS $$
        BEGIN
            NEW.updated_at = now();
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql;

        DROP TRIGGER IF EXISTS updates_touch_updated_at ON updates;
        CREATE TRIGGER updates_touch_updated_at
            BEFORE UPDATE ON updates
            FOR EACH ROW
            EXECUTE FUNCTION updates_touch_updated_at();
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
