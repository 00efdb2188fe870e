//! In-memory storage for active game machines.
//!
//! Game state lives per auth session and per game, keyed by the session
//! cookie. Entries auto-expire after a period of inactivity; cleanup runs
//! probabilistically on access so there is no background task.

use crate::config;
use crate::games::detective::ErrorDetectiveGame;
use crate::games::ladder::ConceptLadderGame;
use crate::games::meaning::MatchMeaningGame;
use crate::games::parallel::ParallelSentenceGame;
use crate::games::quiz::QuizBattleGame;
use crate::games::quiz_room::QuizRoom;
use crate::games::story::StoryBuilderGame;
use crate::games::time_travel::TimeTravelGame;
use crate::games::visual::VisualWordGame;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// A running machine of any game variant
#[derive(Debug, Clone)]
pub enum ActiveGame {
  Parallel(ParallelSentenceGame),
  Story(StoryBuilderGame),
  Ladder(ConceptLadderGame),
  Visual(VisualWordGame),
  QuizBattle(QuizBattleGame),
  Detective(ErrorDetectiveGame),
  Meaning(MatchMeaningGame),
  TimeTravel(TimeTravelGame),
  Room(QuizRoom),
}

/// Entry with last access time for expiration
struct GameEntry {
  game: ActiveGame,
  last_access: DateTime<Utc>,
}

/// Global store of running games
static GAMES: LazyLock<Mutex<HashMap<String, GameEntry>>> =
  LazyLock::new(|| Mutex::new(HashMap::new()));

/// Key for one (session, game) pair
pub fn game_key(session_id: &str, game_id: &str) -> String {
  format!("{}:{}", session_id, game_id)
}

/// Fetch a running game, bumping its last-access time.
pub fn get_game(key: &str) -> Option<ActiveGame> {
  let mut games = GAMES.lock().expect("Game store lock poisoned");

  // Clean up expired entries occasionally (~10% chance)
  if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
    cleanup_expired(&mut games);
  }

  games.get_mut(key).map(|entry| {
    entry.last_access = Utc::now();
    entry.game.clone()
  })
}

/// Store (or replace) a running game.
pub fn put_game(key: &str, game: ActiveGame) {
  let mut games = GAMES.lock().expect("Game store lock poisoned");
  games.insert(
    key.to_string(),
    GameEntry { game, last_access: Utc::now() },
  );
}

/// Drop a running game (restart, or run finished).
pub fn remove_game(key: &str) {
  let mut games = GAMES.lock().expect("Game store lock poisoned");
  games.remove(key);
}

/// Clean up entries idle past the expiry window
fn cleanup_expired(games: &mut HashMap<String, GameEntry>) {
  let expiry = Utc::now() - Duration::hours(config::GAME_SESSION_EXPIRY_HOURS);
  games.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
