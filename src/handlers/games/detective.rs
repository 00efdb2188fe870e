//! Error Detective page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::detective::ErrorDetectiveGame;
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "error-detective";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load(auth: &AuthContext) -> ErrorDetectiveGame {
  match session::get_game(&key(auth)) {
    Some(ActiveGame::Detective(game)) => game,
    _ => ErrorDetectiveGame::new(),
  }
}

fn save(auth: &AuthContext, game: ErrorDetectiveGame) {
  session::put_game(&key(auth), ActiveGame::Detective(game));
}

#[derive(Template)]
#[template(path = "games/detective.html")]
struct DetectiveTemplate {
  nav: NavContext,
  phase: &'static str,
  day: u32,
  total_days: usize,
  score: i64,
  incorrect_sentence: String,
  error_type: String,
  explanation: String,
  feedback_correct: bool,
  feedback_msg: String,
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load(auth);
  let content = &state.content.error_questions;

  let (incorrect_sentence, error_type, explanation) = match game.current(content) {
    Some(q) => (q.incorrect_sentence.clone(), q.error_type.clone(), q.explanation.clone()),
    None => (String::new(), String::new(), String::new()),
  };
  let (feedback_correct, feedback_msg) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => {
      (outcome.correct, feedback_message(t, outcome))
    }
    _ => (false, String::new()),
  };

  let template = DetectiveTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    day: game.day,
    total_days: content.len(),
    score: game.score,
    incorrect_sentence,
    error_type,
    explanation,
    feedback_correct,
    feedback_msg,
  };
  Html(template.render().unwrap_or_default())
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load(auth);

  if let Some(outcome) = game
    .submit(&form.answer, &state.content.error_questions)
    .log_warn("Detective submission rejected")
  {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load(auth);

  if game
    .acknowledge(&state.content.error_questions)
    .log_warn("Detective acknowledge rejected")
    .is_some()
    && game.phase == Phase::Complete
  {
    finish_run(state, GAME_ID, game.day, game.score, Some("error-hunter"));
  }
  save(auth, game);
  back_to(GAME_ID)
}
