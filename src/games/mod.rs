//! Game state machines.
//!
//! Each mini-game is an explicit machine over [`Phase`]: present a question,
//! accept exactly one answer, show feedback, advance on an explicit
//! [`acknowledge`]-style call. No timers live in game logic - "wait then
//! advance" belongs to the UI, which calls `acknowledge` when it is ready.
//! Shuffling always takes a caller-supplied RNG so tests can seed it.
//!
//! Games return a [`RoundOutcome`] per submission; [`apply_outcome`] maps it
//! onto the progress store. Score and skill constants live with each game.

pub mod detective;
pub mod ladder;
pub mod meaning;
pub mod parallel;
pub mod quiz;
pub mod quiz_room;
pub mod story;
pub mod time_travel;
pub mod visual;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{Skill, UserProgress};
use crate::store::{ProgressStore, StoreError};
use crate::validation::{MatchVerdict, ValidateError};

/// Where a game sits in its question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  /// Choosing a mode or subject before the first question
  Selecting,
  /// A question is on screen, waiting for one answer
  Answering,
  /// Verdict shown, waiting for the player to acknowledge it
  Feedback,
  /// Between questions: the next round needs to be dealt (shuffled)
  Advancing,
  /// The run is over
  Complete,
}

/// What a single submission earned.
///
/// The machine computes it; the caller applies it to the store. Keeping the
/// two apart makes every game testable without persistence. Games that give
/// nothing for a wrong answer set `skill_delta` to 0; Story Builder hands
/// out partial credit, so the delta is not tied to `correct`.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
  pub correct: bool,
  /// Present when the answer went through the validator
  pub verdict: Option<MatchVerdict>,
  pub score_delta: i64,
  pub skill: Skill,
  pub skill_delta: i32,
  /// Day (or step) cleared by this answer, if it finished one
  pub completed_day: Option<u32>,
}

/// A call that does not fit the machine's current phase, or content that
/// ran out under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
  /// Operation not valid in the current phase
  Phase { expected: Phase, actual: Phase },
  /// No content row for the requested day
  MissingContent { day: u32 },
  Validation(ValidateError),
}

impl std::fmt::Display for GameError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      GameError::Phase { expected, actual } => {
        write!(f, "expected phase {:?}, game is in {:?}", expected, actual)
      }
      GameError::MissingContent { day } => write!(f, "no content for day {}", day),
      GameError::Validation(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for GameError {}

impl From<ValidateError> for GameError {
  fn from(e: ValidateError) -> Self {
    GameError::Validation(e)
  }
}

/// Shuffle in place with an explicit RNG.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
  items.shuffle(rng);
}

/// Apply one round's earnings: skill points when any were won, plus the
/// day marker when the answer cleared a day.
pub fn apply_outcome(
  store: &impl ProgressStore,
  outcome: &RoundOutcome,
) -> Result<UserProgress, StoreError> {
  if outcome.skill_delta != 0 {
    store.update_skill(outcome.skill, outcome.skill_delta)?;
  }
  if let Some(day) = outcome.completed_day {
    store.mark_day_completed(day)?;
  }
  store.get_or_init()
}

/// Record a finished run against the per-game progress entry.
pub fn record_run(
  store: &impl ProgressStore,
  game_id: &str,
  level: u32,
  score: i64,
  now: DateTime<Utc>,
) -> Result<UserProgress, StoreError> {
  store.update_game_progress(game_id, level, score, now)
}
