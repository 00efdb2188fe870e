//! Database schema with version-gated migrations.
//!
//! Each migration checks the current schema version, runs its SQL, then
//! records the new version in `db_version`. Migrations only run once - the
//! version check makes re-running `run_migrations` idempotent.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Current schema version. Increment when adding a migration.
pub const DB_VERSION: i32 = 2;

/// Bring the schema up to date, creating tables on a fresh database.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    // Bootstrap: db_version must exist before we can check it
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS db_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL,
            description TEXT
        );
        "#,
    )?;

    let current_version = get_schema_version(conn)?;
    tracing::debug!("database schema version: {}", current_version);

    if current_version < 1 {
        migrate_v0_to_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v1_to_v2(conn)?;
    }

    Ok(())
}

/// v0 -> v1: profile blob storage, users and sessions for the auth gate
fn migrate_v0_to_v1(conn: &Connection) -> Result<()> {
    tracing::info!("Running migration v0 -> v1: Create base tables");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS profile (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE COLLATE NOCASE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            last_login_at TEXT
        );

        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions(expires_at);
        "#,
    )?;

    record_version(conn, 1, "Create base tables (profile, users, sessions)")?;
    Ok(())
}

/// v1 -> v2: student/teacher role on users
fn migrate_v1_to_v2(conn: &Connection) -> Result<()> {
    tracing::info!("Running migration v1 -> v2: Add user role");

    conn.execute_batch(
        r#"
        ALTER TABLE users ADD COLUMN role TEXT NOT NULL DEFAULT 'student';
        "#,
    )?;

    record_version(conn, 2, "Add role column to users")?;
    Ok(())
}

/// Read the highest applied schema version (0 on a fresh database)
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM db_version", [], |row| row.get(0))
        .optional()?
        .flatten();
    Ok(version.unwrap_or(0))
}

fn record_version(conn: &Connection, version: i32, description: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO db_version (version, applied_at, description) VALUES (?1, ?2, ?3)",
        params![version, Utc::now().to_rfc3339(), description],
    )?;
    Ok(())
}
