//! Database initialization
//!
//! Opens (or creates) the SQLite file and creates the `venue`, `artist` and
//! `show` tables if they are missing. Foreign keys are enforced on every
//! pooled connection.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// SQLite busy timeout applied to every connection
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// The pool holds a single connection that never idles out, so the
/// database lives exactly as long as the pool.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent - safe to call multiple times)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_venue_table(pool).await?;
    create_artist_table(pool).await?;
    create_show_table(pool).await?;
    Ok(())
}

async fn create_venue_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            city TEXT NOT NULL CHECK (length(trim(city)) > 0),
            state TEXT NOT NULL CHECK (length(trim(state)) > 0),
            address TEXT NOT NULL CHECK (length(trim(address)) > 0),
            phone TEXT,
            website TEXT,
            image_link TEXT,
            facebook_link TEXT,
            genres TEXT NOT NULL DEFAULT '[]',
            seeking_talent BOOLEAN NOT NULL DEFAULT 0,
            seeking_description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_artist_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(trim(name)) > 0),
            city TEXT NOT NULL CHECK (length(trim(city)) > 0),
            state TEXT NOT NULL CHECK (length(trim(state)) > 0),
            phone TEXT,
            website TEXT,
            image_link TEXT,
            facebook_link TEXT,
            genres TEXT NOT NULL DEFAULT '[]',
            seeking_venue BOOLEAN NOT NULL DEFAULT 0,
            seeking_description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_show_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS show (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            artist_id INTEGER NOT NULL REFERENCES artist(id) ON DELETE CASCADE,
            venue_id INTEGER NOT NULL REFERENCES venue(id) ON DELETE CASCADE,
            start_time TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_show_venue ON show(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_show_artist ON show(artist_id)")
        .execute(pool)
        .await?;

    Ok(())
}
