//! Game pages: the hub, shared forms, and per-game dispatch.
//!
//! Every game is served under `/games/{id}` with a uniform set of POST
//! actions (select, answer, pick, unpick, acknowledge, restart). The
//! dispatcher routes each to the game's module; actions a game does not
//! have just bounce back to its page.

pub mod detective;
pub mod ladder;
pub mod meaning;
pub mod parallel;
pub mod quiz;
pub mod story;
pub mod time_travel;
pub mod visual;

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum::Form;
use chrono::Utc;
use serde::Deserialize;

use super::{lang_from, NavContext};
use crate::auth::AuthContext;
use crate::config;
use crate::db::LogOnError;
use crate::i18n::{translations, Translations};
use crate::session;
use crate::state::AppState;
use crate::store::{ProgressStore, SqliteStore};

/// Mode/subject selection
#[derive(Deserialize)]
pub struct SelectForm {
  pub choice: String,
}

/// One answer submission; games read the fields they use
#[derive(Deserialize)]
pub struct AnswerForm {
  #[serde(default)]
  pub answer: String,
  #[serde(default)]
  pub index: Option<usize>,
  #[serde(default)]
  pub time_left: Option<u32>,
}

/// Word/sentence pick by position
#[derive(Deserialize)]
pub struct PickForm {
  pub index: usize,
}

pub(crate) fn store(state: &AppState) -> SqliteStore {
  SqliteStore::new(state.pool.clone())
}

pub(crate) fn back_to(game_id: &str) -> Redirect {
  Redirect::to(&format!("/games/{}", game_id))
}

/// Record a finished run and hand out completion badges.
pub(crate) fn finish_run(
  state: &AppState,
  game_id: &str,
  level: u32,
  score: i64,
  badge: Option<&str>,
) {
  let store = store(state);
  let now = Utc::now();
  let _ = crate::games::record_run(&store, game_id, level, score, now)
    .log_warn("Failed to record run");
  let progress = store.complete_game(game_id, now).log_warn("Failed to flag completion");

  if let Some(badge_id) = badge {
    let _ = store.add_badge(badge_id).log_warn("Failed to award badge");
  }

  // Every game finished at least once earns the grand badge
  if let Some(progress) = progress {
    let all_done = config::GAMES
      .iter()
      .all(|g| progress.games_progress.get(g.id).is_some_and(|p| p.completed));
    if all_done {
      let _ = store.add_badge("village-hero").log_warn("Failed to award badge");
    }
  }
}

// ==================== Hub ====================

struct HubGame {
  id: &'static str,
  name: &'static str,
  description: &'static str,
  skill: &'static str,
  unlock_level: u32,
  unlocked: bool,
  completed: bool,
}

#[derive(Template)]
#[template(path = "games/hub.html")]
struct HubTemplate {
  nav: NavContext,
  level: u32,
  games: Vec<HubGame>,
}

pub async fn hub(State(state): State<AppState>, auth: AuthContext, jar: CookieJar) -> Html<String> {
  let t = translations(lang_from(&jar));
  let progress = store(&state).get_or_init().log_warn("Failed to load progress").unwrap_or_default();

  let games = config::GAMES
    .iter()
    .map(|g| HubGame {
      id: g.id,
      name: g.name,
      description: g.description,
      skill: g.skill.as_str(),
      unlock_level: g.unlock_level,
      unlocked: progress.level >= g.unlock_level,
      completed: progress.games_progress.get(g.id).is_some_and(|p| p.completed),
    })
    .collect();

  let template = HubTemplate {
    nav: NavContext::new(&auth, t),
    level: progress.level,
    games,
  };
  Html(template.render().unwrap_or_default())
}

// ==================== Dispatch ====================

fn known_game(game_id: &str) -> bool {
  config::get_game_info(game_id).is_some()
}

fn lang_table(jar: &CookieJar) -> &'static Translations {
  translations(lang_from(jar))
}

pub async fn game_page(
  State(state): State<AppState>,
  auth: AuthContext,
  jar: CookieJar,
  Path(game_id): Path<String>,
) -> Response {
  if !known_game(&game_id) {
    return Redirect::to("/games").into_response();
  }
  let t = lang_table(&jar);
  match game_id.as_str() {
    "parallel-sentence" => parallel::page(&state, &auth, t).into_response(),
    "story-builder" => story::page(&state, &auth, t).into_response(),
    "concept-ladder" => ladder::page(&state, &auth, t).into_response(),
    "visual-word" => visual::page(&state, &auth, t).into_response(),
    "quiz-battle" => quiz::page(&state, &auth, t).into_response(),
    "error-detective" => detective::page(&state, &auth, t).into_response(),
    "match-meaning" => meaning::page(&state, &auth, t).into_response(),
    "time-travel" => time_travel::page(&state, &auth, t).into_response(),
    _ => Redirect::to("/games").into_response(),
  }
}

pub async fn game_select(
  State(state): State<AppState>,
  auth: AuthContext,
  Path(game_id): Path<String>,
  Form(form): Form<SelectForm>,
) -> Response {
  match game_id.as_str() {
    "parallel-sentence" => parallel::select(&state, &auth, &form).into_response(),
    "concept-ladder" => ladder::select(&auth, &form).into_response(),
    "quiz-battle" => quiz::select(&auth, &form).into_response(),
    _ => back_to(&game_id).into_response(),
  }
}

pub async fn game_answer(
  State(state): State<AppState>,
  auth: AuthContext,
  Path(game_id): Path<String>,
  Form(form): Form<AnswerForm>,
) -> Response {
  match game_id.as_str() {
    "parallel-sentence" => parallel::answer(&state, &auth, &form).into_response(),
    "story-builder" => story::answer(&state, &auth).into_response(),
    "concept-ladder" => ladder::answer(&state, &auth, &form).into_response(),
    "visual-word" => visual::answer(&state, &auth, &form).into_response(),
    "quiz-battle" => quiz::answer(&state, &auth, &form).into_response(),
    "error-detective" => detective::answer(&state, &auth, &form).into_response(),
    "match-meaning" => meaning::answer(&state, &auth, &form).into_response(),
    "time-travel" => time_travel::answer(&state, &auth, &form).into_response(),
    _ => back_to(&game_id).into_response(),
  }
}

pub async fn game_pick(
  auth: AuthContext,
  Path(game_id): Path<String>,
  Form(form): Form<PickForm>,
) -> Response {
  match game_id.as_str() {
    "parallel-sentence" => parallel::pick(&auth, &form).into_response(),
    "story-builder" => story::pick(&auth, &form).into_response(),
    _ => back_to(&game_id).into_response(),
  }
}

pub async fn game_unpick(
  auth: AuthContext,
  Path(game_id): Path<String>,
  Form(form): Form<PickForm>,
) -> Response {
  match game_id.as_str() {
    "parallel-sentence" => parallel::unpick(&auth, &form).into_response(),
    "story-builder" => story::unpick(&auth, &form).into_response(),
    _ => back_to(&game_id).into_response(),
  }
}

pub async fn game_acknowledge(
  State(state): State<AppState>,
  auth: AuthContext,
  Path(game_id): Path<String>,
) -> Response {
  match game_id.as_str() {
    "parallel-sentence" => parallel::acknowledge(&state, &auth).into_response(),
    "story-builder" => story::acknowledge(&state, &auth).into_response(),
    "concept-ladder" => ladder::acknowledge(&state, &auth).into_response(),
    "visual-word" => visual::acknowledge(&state, &auth).into_response(),
    "quiz-battle" => quiz::acknowledge(&state, &auth).into_response(),
    "error-detective" => detective::acknowledge(&state, &auth).into_response(),
    "match-meaning" => meaning::acknowledge(&state, &auth).into_response(),
    "time-travel" => time_travel::acknowledge(&state, &auth).into_response(),
    _ => back_to(&game_id).into_response(),
  }
}

pub async fn game_restart(auth: AuthContext, Path(game_id): Path<String>) -> Redirect {
  session::remove_game(&session::game_key(&auth.session_id, &game_id));
  back_to(&game_id)
}
