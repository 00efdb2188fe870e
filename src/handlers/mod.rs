//! Page handlers and the route table.

pub mod games;
pub mod home;
pub mod progress;
pub mod settings;
pub mod teacher;

use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::CookieJar;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::games::RoundOutcome;
use crate::i18n::{self, Lang, Translations};
use crate::state::AppState;

/// Navbar context shared by every page template.
pub struct NavContext {
  pub username: String,
  pub is_teacher: bool,
  pub t: &'static Translations,
}

impl NavContext {
  pub fn new(auth: &auth::AuthContext, t: &'static Translations) -> Self {
    Self {
      username: auth.username.clone(),
      is_teacher: auth.is_teacher(),
      t,
    }
  }
}

/// Language from the cookie, defaulting to English.
pub fn lang_from(jar: &CookieJar) -> Lang {
  jar
    .get(i18n::LANG_COOKIE_NAME)
    .and_then(|c| Lang::from_str(c.value()))
    .unwrap_or_default()
}

/// User-facing line for a round's verdict: letter-perfect, close-enough and
/// wrong-but-near all read differently.
pub fn feedback_message(t: &Translations, outcome: &RoundOutcome) -> String {
  if outcome.correct {
    match &outcome.verdict {
      Some(v) if !v.is_exact => t.common.close_enough.to_string(),
      _ => t.common.correct.to_string(),
    }
  } else {
    match &outcome.verdict {
      Some(v) if !v.suggestions.is_empty() => t.common.almost.to_string(),
      _ => t.common.incorrect.to_string(),
    }
  }
}

/// Assemble the application router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(home::index))
    .route("/login", get(auth::login_page).post(auth::login_submit))
    .route("/register", get(auth::register_page).post(auth::register_submit))
    .route("/logout", get(auth::logout))
    .route("/games", get(games::hub))
    .route("/games/{game_id}", get(games::game_page))
    .route("/games/{game_id}/select", post(games::game_select))
    .route("/games/{game_id}/answer", post(games::game_answer))
    .route("/games/{game_id}/pick", post(games::game_pick))
    .route("/games/{game_id}/unpick", post(games::game_unpick))
    .route("/games/{game_id}/acknowledge", post(games::game_acknowledge))
    .route("/games/{game_id}/restart", post(games::game_restart))
    .route("/progress", get(progress::page))
    .route("/teacher", get(teacher::panel))
    .route("/teacher/quiz/start", post(teacher::quiz_start))
    .route("/teacher/quiz/answer", post(teacher::quiz_answer))
    .route("/teacher/quiz/advance", post(teacher::quiz_advance))
    .route("/teacher/quiz/end", post(teacher::quiz_end))
    .route("/settings", get(settings::page).post(settings::update_profile))
    .route("/settings/avatar", post(settings::cycle_avatar))
    .route("/settings/language", post(settings::set_language))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
