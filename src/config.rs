//! Application configuration constants.
//!
//! Centralizes the tunables and the static registries (games, badges) that
//! the rest of the codebase reads.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Skill;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(db) = config.database {
                if let Some(path) = db.path {
                    tracing::info!("Using database from config.toml: {}", path);
                    return PathBuf::from(path);
                }
            }
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from(crate::paths::db_path());
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "127.0.0.1";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Session Configuration ====================

/// Auth session lifetime in hours (1 week)
pub const SESSION_DURATION_HOURS: i64 = 24 * 7;

/// Game session expiration after inactivity, in hours
pub const GAME_SESSION_EXPIRY_HOURS: i64 = 4;

/// Probability threshold for session cleanup (0-255, lower = more frequent)
/// Value of 25 means ~10% chance (25/256) on each session access
pub const SESSION_CLEANUP_THRESHOLD: u8 = 25;

// ==================== Profile Configuration ====================

/// Number of selectable avatars, cycled in settings
pub const AVATAR_COUNT: u8 = 6;

/// Each proficiency track caps here
pub const SKILL_MAX: u8 = 100;

/// Total skill points per level: level = total / step + 1
pub const LEVEL_STEP_POINTS: u32 = 50;

/// Profile identity used when no record exists yet
pub const DEFAULT_USER_ID: &str = "student1";
pub const DEFAULT_USER_NAME: &str = "Student";

/// Streak length that earns the streak-keeper badge
pub const STREAK_BADGE_DAYS: u32 = 7;

// ==================== Game Tunables ====================

/// Number of wrong choices presented alongside the correct one
pub const DISTRACTOR_COUNT: usize = 3;

// ==================== Game Registry ====================

/// Static description of one mini-game
pub struct GameInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub skill: Skill,
    pub description: &'static str,
    pub unlock_level: u32,
}

/// All mini-games, in hub display order
pub const GAMES: [GameInfo; 8] = [
    GameInfo {
        id: "parallel-sentence",
        name: "Parallel Sentence",
        skill: Skill::Vocabulary,
        description: "Match sentences with similar meanings",
        unlock_level: 1,
    },
    GameInfo {
        id: "story-builder",
        name: "Story Builder Quest",
        skill: Skill::Creativity,
        description: "Arrange sentences to build stories",
        unlock_level: 1,
    },
    GameInfo {
        id: "concept-ladder",
        name: "Concept Ladder",
        skill: Skill::Logic,
        description: "Climb the ladder of knowledge",
        unlock_level: 2,
    },
    GameInfo {
        id: "visual-word",
        name: "Visual to Word",
        skill: Skill::Vocabulary,
        description: "Match images with words",
        unlock_level: 2,
    },
    GameInfo {
        id: "quiz-battle",
        name: "Quiz Battle Arena",
        skill: Skill::Speed,
        description: "Battle against time and a rival",
        unlock_level: 3,
    },
    GameInfo {
        id: "error-detective",
        name: "Error Detective",
        skill: Skill::Logic,
        description: "Find and fix mistakes",
        unlock_level: 3,
    },
    GameInfo {
        id: "match-meaning",
        name: "Match the Meaning",
        skill: Skill::Vocabulary,
        description: "Connect words to meanings",
        unlock_level: 4,
    },
    GameInfo {
        id: "time-travel",
        name: "Time Travel Questions",
        skill: Skill::Logic,
        description: "Past choices affect future",
        unlock_level: 5,
    },
];

/// Get game info by id
pub fn get_game_info(id: &str) -> Option<&'static GameInfo> {
    GAMES.iter().find(|g| g.id == id)
}

// ==================== Badge Catalog ====================

/// Static description of one achievement badge
pub struct BadgeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// All badges, in wall display order
pub const BADGES: [BadgeInfo; 10] = [
    BadgeInfo {
        id: "grammar-guardian",
        name: "Grammar Guardian",
        description: "Master 10 grammar concepts",
        icon: "\u{1F4DA}",
    },
    BadgeInfo {
        id: "story-teller",
        name: "Story Teller of the Village",
        description: "Complete 5 stories",
        icon: "\u{1F4D6}",
    },
    BadgeInfo {
        id: "math-warrior",
        name: "Math Warrior",
        description: "Solve 20 math problems",
        icon: "\u{1F522}",
    },
    BadgeInfo {
        id: "science-explorer",
        name: "Science Explorer",
        description: "Answer 15 science questions",
        icon: "\u{1F52C}",
    },
    BadgeInfo {
        id: "speed-master",
        name: "Speed Master",
        description: "Win 10 quick battles",
        icon: "\u{26A1}",
    },
    BadgeInfo {
        id: "error-hunter",
        name: "Error Hunter",
        description: "Find 15 errors",
        icon: "\u{1F50D}",
    },
    BadgeInfo {
        id: "word-wizard",
        name: "Word Wizard",
        description: "Match 20 meanings",
        icon: "\u{2728}",
    },
    BadgeInfo {
        id: "streak-keeper",
        name: "Streak Keeper",
        description: "7 day streak",
        icon: "\u{1F525}",
    },
    BadgeInfo {
        id: "perfect-score",
        name: "Perfect Score",
        description: "Get 100% in any game",
        icon: "\u{1F4AF}",
    },
    BadgeInfo {
        id: "village-hero",
        name: "Village Hero",
        description: "Complete all levels",
        icon: "\u{1F3C6}",
    },
];

/// Get badge info by id
pub fn get_badge_info(id: &str) -> Option<&'static BadgeInfo> {
    BADGES.iter().find(|b| b.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_registry_lookup() {
        let game = get_game_info("quiz-battle").expect("registered");
        assert_eq!(game.name, "Quiz Battle Arena");
        assert_eq!(game.unlock_level, 3);
        assert!(get_game_info("chess").is_none());
    }

    #[test]
    fn test_game_ids_unique() {
        for (i, a) in GAMES.iter().enumerate() {
            for b in &GAMES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_badge_lookup() {
        assert!(get_badge_info("streak-keeper").is_some());
        assert!(get_badge_info("no-such-badge").is_none());
    }
}
