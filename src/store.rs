//! Learner progress persistence behind a swappable backend.
//!
//! One record per device. All mutations are read-modify-write against that
//! single record; the deployment model is single user, single tab, so there
//! is no compare-and-swap - concurrent writers would lose updates (last
//! write wins). A multi-writer port would need a version column or a
//! single-writer queue.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config;
use crate::db::{self, DbPool};
use crate::domain::{GameProgress, Skill, UserProgress};

/// Storage key for the serialized profile blob
const PROFILE_KEY: &str = "user_progress";

/// Persistence failure in a store backend.
#[derive(Debug)]
pub enum StoreError {
  Backend(String),
}

impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreError::Backend(msg) => write!(f, "progress store failure: {}", msg),
    }
  }
}

impl std::error::Error for StoreError {}

/// Get/save primitives plus the shared update policies.
///
/// Backends implement only [`load`](ProgressStore::load) and
/// [`save`](ProgressStore::save); every update operation is a provided
/// read-modify-write with the clamp/merge rules the games rely on.
pub trait ProgressStore {
  /// Read the stored record. A corrupt blob reads as `None` (the caller
  /// re-initializes), never as an error.
  fn load(&self) -> Result<Option<UserProgress>, StoreError>;

  fn save(&self, progress: &UserProgress) -> Result<(), StoreError>;

  /// Load the record, repairing a bad avatar index, or create a default one.
  fn get_or_init(&self) -> Result<UserProgress, StoreError> {
    match self.load()? {
      Some(mut progress) => {
        progress.clamp_avatar();
        Ok(progress)
      }
      None => {
        let progress = UserProgress::default();
        self.save(&progress)?;
        Ok(progress)
      }
    }
  }

  /// Add skill points, clamped to 0..=100, and recompute the level.
  fn update_skill(&self, skill: Skill, delta: i32) -> Result<UserProgress, StoreError> {
    let mut progress = self.get_or_init()?;
    let current = i32::from(progress.skills.get(skill));
    let next = (current + delta).clamp(0, i32::from(config::SKILL_MAX)) as u8;
    progress.skills.set(skill, next);
    progress.recompute_level();
    self.save(&progress)?;
    Ok(progress)
  }

  /// Record a finished round: monotonic max on level and high score,
  /// additive on the lifetime total.
  fn update_game_progress(
    &self,
    game_id: &str,
    level: u32,
    score: i64,
    now: DateTime<Utc>,
  ) -> Result<UserProgress, StoreError> {
    let mut progress = self.get_or_init()?;
    let entry = progress
      .games_progress
      .entry(game_id.to_string())
      .or_insert_with(|| GameProgress::new(now));
    entry.current_level = entry.current_level.max(level);
    entry.high_score = entry.high_score.max(score);
    entry.last_played = now;
    progress.total_score += score;
    self.save(&progress)?;
    Ok(progress)
  }

  /// Flag a game as finished at least once. Monotonic: never unset.
  fn complete_game(&self, game_id: &str, now: DateTime<Utc>) -> Result<UserProgress, StoreError> {
    let mut progress = self.get_or_init()?;
    let entry = progress
      .games_progress
      .entry(game_id.to_string())
      .or_insert_with(|| GameProgress::new(now));
    if !entry.completed {
      entry.completed = true;
      entry.last_played = now;
      self.save(&progress)?;
    }
    Ok(progress)
  }

  /// Idempotent set-insert.
  fn add_badge(&self, badge_id: &str) -> Result<UserProgress, StoreError> {
    let mut progress = self.get_or_init()?;
    if !progress.badges.iter().any(|b| b == badge_id) {
      progress.badges.push(badge_id.to_string());
      self.save(&progress)?;
    }
    Ok(progress)
  }

  /// Idempotent set-insert.
  fn mark_day_completed(&self, day: u32) -> Result<UserProgress, StoreError> {
    let mut progress = self.get_or_init()?;
    if !progress.completed_days.contains(&day) {
      progress.completed_days.push(day);
      self.save(&progress)?;
    }
    Ok(progress)
  }

  /// Advance the daily streak. `today` is supplied by the caller so the
  /// policy stays clock-free: same day is a no-op, consecutive days
  /// increment, any gap (or a first-ever login) resets to 1.
  fn update_daily_streak(&self, today: NaiveDate) -> Result<UserProgress, StoreError> {
    let mut progress = self.get_or_init()?;
    if progress.last_login_date == Some(today) {
      return Ok(progress);
    }

    let yesterday = today.pred_opt();
    progress.daily_streak = if progress.last_login_date.is_some() && progress.last_login_date == yesterday
    {
      progress.daily_streak + 1
    } else {
      1
    };
    progress.last_login_date = Some(today);
    self.save(&progress)?;
    Ok(progress)
  }
}

// ============================================================================
// SQLite backend
// ============================================================================

/// Stores the profile as one JSON blob in the `profile` key-value table.
pub struct SqliteStore {
  pool: DbPool,
}

impl SqliteStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

impl ProgressStore for SqliteStore {
  fn load(&self) -> Result<Option<UserProgress>, StoreError> {
    use rusqlite::OptionalExtension;

    let conn = db::try_lock(&self.pool).map_err(|e| StoreError::Backend(e.to_string()))?;
    let blob: Option<String> = conn
      .query_row(
        "SELECT value FROM profile WHERE key = ?1",
        rusqlite::params![PROFILE_KEY],
        |row| row.get(0),
      )
      .optional()
      .map_err(|e| StoreError::Backend(e.to_string()))?;

    match blob {
      Some(json) => match serde_json::from_str(&json) {
        Ok(progress) => Ok(Some(progress)),
        Err(e) => {
          // Corrupt record: recover with a fresh default instead of failing
          tracing::warn!("Stored progress is corrupt, re-initializing: {}", e);
          Ok(None)
        }
      },
      None => Ok(None),
    }
  }

  fn save(&self, progress: &UserProgress) -> Result<(), StoreError> {
    let json =
      serde_json::to_string(progress).map_err(|e| StoreError::Backend(e.to_string()))?;
    let conn = db::try_lock(&self.pool).map_err(|e| StoreError::Backend(e.to_string()))?;
    conn
      .execute(
        "INSERT OR REPLACE INTO profile (key, value) VALUES (?1, ?2)",
        rusqlite::params![PROFILE_KEY, json],
      )
      .map_err(|e| StoreError::Backend(e.to_string()))?;
    Ok(())
  }
}

// ============================================================================
// In-memory backend
// ============================================================================

/// Backend for tests and local simulations; nothing touches disk.
#[derive(Default)]
pub struct MemoryStore {
  record: std::sync::Mutex<Option<UserProgress>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl ProgressStore for MemoryStore {
  fn load(&self) -> Result<Option<UserProgress>, StoreError> {
    let record = self
      .record
      .lock()
      .map_err(|_| StoreError::Backend("memory store poisoned".to_string()))?;
    Ok(record.clone())
  }

  fn save(&self, progress: &UserProgress) -> Result<(), StoreError> {
    let mut record = self
      .record
      .lock()
      .map_err(|_| StoreError::Backend("memory store poisoned".to_string()))?;
    *record = Some(progress.clone());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use rusqlite::Connection;
  use std::sync::{Arc, Mutex};

  fn sqlite_store() -> SqliteStore {
    let conn = Connection::open_in_memory().expect("in-memory db");
    crate::db::schema::run_migrations(&conn).expect("migrations");
    SqliteStore::new(Arc::new(Mutex::new(conn)))
  }

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
  }

  #[test]
  fn test_get_or_init_creates_default() {
    let store = MemoryStore::new();
    let progress = store.get_or_init().expect("init");
    assert_eq!(progress.user_id, config::DEFAULT_USER_ID);
    assert_eq!(progress.level, 1);
    // Now persisted
    assert!(store.load().expect("load").is_some());
  }

  #[test]
  fn test_update_skill_clamps_and_levels() {
    let store = MemoryStore::new();
    store.update_skill(Skill::Logic, 60).expect("first");
    let progress = store.update_skill(Skill::Logic, 60).expect("second");
    // 60 + 60 clamps at 100, not 120
    assert_eq!(progress.skills.logic, 100);
    // level = 100 / 50 + 1
    assert_eq!(progress.level, 3);
  }

  #[test]
  fn test_update_skill_never_goes_negative() {
    let store = MemoryStore::new();
    let progress = store.update_skill(Skill::Speed, -10).expect("update");
    assert_eq!(progress.skills.speed, 0);
  }

  #[test]
  fn test_game_progress_monotonic_and_additive() {
    let store = MemoryStore::new();
    let now = Utc::now();
    store.update_game_progress("quiz-battle", 2, 50, now).expect("first");
    let progress = store.update_game_progress("quiz-battle", 1, 30, now).expect("second");

    let entry = &progress.games_progress["quiz-battle"];
    // Level and high score never regress
    assert_eq!(entry.current_level, 2);
    assert_eq!(entry.high_score, 50);
    // Lifetime total is additive
    assert_eq!(progress.total_score, 80);
  }

  #[test]
  fn test_complete_game_is_monotonic() {
    let store = MemoryStore::new();
    let now = Utc::now();
    store.complete_game("visual-word", now).expect("first");
    let progress = store.complete_game("visual-word", now).expect("second");
    assert!(progress.games_progress["visual-word"].completed);
  }

  #[test]
  fn test_add_badge_idempotent() {
    let store = MemoryStore::new();
    store.add_badge("streak-keeper").expect("first");
    let progress = store.add_badge("streak-keeper").expect("second");
    assert_eq!(progress.badges, vec!["streak-keeper".to_string()]);
  }

  #[test]
  fn test_mark_day_completed_idempotent() {
    let store = MemoryStore::new();
    store.mark_day_completed(3).expect("first");
    let progress = store.mark_day_completed(3).expect("second");
    assert_eq!(progress.completed_days, vec![3]);
  }

  #[test]
  fn test_streak_first_login_starts_at_one() {
    let store = MemoryStore::new();
    let progress = store.update_daily_streak(day(2025, 3, 10)).expect("streak");
    assert_eq!(progress.daily_streak, 1);
    assert_eq!(progress.last_login_date, Some(day(2025, 3, 10)));
  }

  #[test]
  fn test_streak_consecutive_day_increments() {
    let store = MemoryStore::new();
    store.update_daily_streak(day(2025, 3, 10)).expect("day 1");
    let progress = store.update_daily_streak(day(2025, 3, 11)).expect("day 2");
    assert_eq!(progress.daily_streak, 2);
  }

  #[test]
  fn test_streak_same_day_is_idempotent() {
    let store = MemoryStore::new();
    store.update_daily_streak(day(2025, 3, 10)).expect("first");
    let progress = store.update_daily_streak(day(2025, 3, 10)).expect("second");
    assert_eq!(progress.daily_streak, 1);
  }

  #[test]
  fn test_streak_gap_resets() {
    let store = MemoryStore::new();
    store.update_daily_streak(day(2025, 3, 10)).expect("day 1");
    store.update_daily_streak(day(2025, 3, 11)).expect("day 2");
    let progress = store.update_daily_streak(day(2025, 3, 14)).expect("after gap");
    assert_eq!(progress.daily_streak, 1);
  }

  #[test]
  fn test_sqlite_roundtrip() {
    let store = sqlite_store();
    let mut progress = UserProgress::new("student1", "Asha");
    progress.total_score = 250;
    store.save(&progress).expect("save");

    let loaded = store.load().expect("load").expect("present");
    assert_eq!(loaded, progress);
  }

  #[test]
  fn test_sqlite_corrupt_blob_recovers() {
    let store = sqlite_store();
    {
      let conn = store.pool.lock().expect("lock");
      conn
        .execute(
          "INSERT INTO profile (key, value) VALUES (?1, '{not json')",
          rusqlite::params![PROFILE_KEY],
        )
        .expect("insert garbage");
    }

    // Corrupt blob reads as absent, and init replaces it
    assert!(store.load().expect("load").is_none());
    let progress = store.get_or_init().expect("init");
    assert_eq!(progress.level, 1);
    assert!(store.load().expect("load").is_some());
  }

  #[test]
  fn test_sqlite_avatar_repaired_on_load() {
    let store = sqlite_store();
    let mut progress = UserProgress::default();
    progress.avatar = 99;
    store.save(&progress).expect("save");

    let loaded = store.get_or_init().expect("load");
    assert_eq!(loaded.avatar, 1);
  }
}
