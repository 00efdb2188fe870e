//! User and session storage for the local auth gate.
//!
//! Single-device deployment: usernames are unique case-insensitively,
//! sessions are plain random ids with an expiry timestamp.

use chrono::{Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Role chosen at registration; gates the teacher dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Self::Student),
            "teacher" => Some(Self::Teacher),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

/// A stored user row
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Create a user; fails on duplicate username (case-insensitive)
pub fn create_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO users (username, password_hash, created_at, role)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![username, password_hash, Utc::now().to_rfc3339(), role.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, username, password_hash, role FROM users WHERE username = ?1",
        params![username],
        |row| {
            let role: String = row.get(3)?;
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                role: Role::from_str(&role).unwrap_or(Role::Student),
            })
        },
    )
    .optional()
}

pub fn update_last_login(conn: &Connection, user_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE users SET last_login_at = ?1 WHERE id = ?2",
        params![Utc::now().to_rfc3339(), user_id],
    )?;
    Ok(())
}

// ==================== Sessions ====================

pub fn create_session(
    conn: &Connection,
    user_id: i64,
    session_id: &str,
    duration_hours: i64,
) -> Result<()> {
    let now = Utc::now();
    let expires = now + Duration::hours(duration_hours);
    conn.execute(
        r#"
        INSERT INTO sessions (id, user_id, created_at, expires_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![session_id, user_id, now.to_rfc3339(), expires.to_rfc3339()],
    )?;
    Ok(())
}

/// Resolve a session id to its user, ignoring expired sessions.
pub fn get_session_user(conn: &Connection, session_id: &str) -> Result<Option<User>> {
    conn.query_row(
        r#"
        SELECT u.id, u.username, u.password_hash, u.role
        FROM sessions s JOIN users u ON u.id = s.user_id
        WHERE s.id = ?1 AND s.expires_at > ?2
        "#,
        params![session_id, Utc::now().to_rfc3339()],
        |row| {
            let role: String = row.get(3)?;
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                role: Role::from_str(&role).unwrap_or(Role::Student),
            })
        },
    )
    .optional()
}

pub fn delete_session(conn: &Connection, session_id: &str) -> Result<()> {
    conn.execute("DELETE FROM sessions WHERE id = ?1", params![session_id])?;
    Ok(())
}

/// Drop sessions past their expiry; returns how many were removed.
pub fn cleanup_expired_sessions(conn: &Connection) -> Result<usize> {
    conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![Utc::now().to_rfc3339()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        run_migrations(&conn).expect("migrations");
        conn
    }

    #[test]
    fn test_create_and_fetch_user() {
        let conn = conn();
        let id = create_user(&conn, "asha", "hash", Role::Student).expect("create");
        let user = get_user_by_username(&conn, "asha").expect("query").expect("present");
        assert_eq!(user.id, id);
        assert_eq!(user.role, Role::Student);

        // Case-insensitive uniqueness
        assert!(create_user(&conn, "Asha", "hash", Role::Student).is_err());
    }

    #[test]
    fn test_unknown_user_is_none() {
        let conn = conn();
        assert!(get_user_by_username(&conn, "ghost").expect("query").is_none());
    }

    #[test]
    fn test_session_roundtrip() {
        let conn = conn();
        let id = create_user(&conn, "meera", "hash", Role::Teacher).expect("create");
        create_session(&conn, id, "session-1", 1).expect("session");

        let user = get_session_user(&conn, "session-1").expect("query").expect("live");
        assert_eq!(user.username, "meera");
        assert_eq!(user.role, Role::Teacher);

        delete_session(&conn, "session-1").expect("delete");
        assert!(get_session_user(&conn, "session-1").expect("query").is_none());
    }

    #[test]
    fn test_expired_session_rejected() {
        let conn = conn();
        let id = create_user(&conn, "ravi", "hash", Role::Student).expect("create");
        // Negative duration: already expired
        create_session(&conn, id, "stale", -1).expect("session");
        assert!(get_session_user(&conn, "stale").expect("query").is_none());

        assert_eq!(cleanup_expired_sessions(&conn).expect("cleanup"), 1);
    }

    #[test]
    fn test_role_string_mapping() {
        assert_eq!(Role::from_str("student"), Some(Role::Student));
        assert_eq!(Role::from_str("teacher"), Some(Role::Teacher));
        assert_eq!(Role::from_str("admin"), None);
        assert_eq!(Role::Teacher.as_str(), "teacher");
    }
}
