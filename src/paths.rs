//! Project path functions - single source of truth for all file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! This allows running isolated instances side by side:
//! ```bash
//! DATA_DIR=data/test cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite database path (profile, users, sessions)
pub fn db_path() -> String {
    format!("{}/verbora.db", data_dir())
}

/// Directory scanned for content-pack JSON files
pub fn content_dir() -> String {
    format!("{}/content", data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: env var override is not testable here because OnceLock
    // initializes once per process. These verify the default shapes.

    #[test]
    fn test_data_dir_default() {
        assert!(!data_dir().is_empty());
    }

    #[test]
    fn test_db_path_format() {
        assert!(db_path().ends_with("/verbora.db"));
    }

    #[test]
    fn test_content_dir_format() {
        assert!(content_dir().ends_with("/content"));
    }
}
