//! Visual to Word page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::visual::VisualWordGame;
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "visual-word";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load(auth: &AuthContext) -> VisualWordGame {
  match session::get_game(&key(auth)) {
    Some(ActiveGame::Visual(game)) => game,
    _ => VisualWordGame::new(),
  }
}

fn save(auth: &AuthContext, game: VisualWordGame) {
  session::put_game(&key(auth), ActiveGame::Visual(game));
}

#[derive(Template)]
#[template(path = "games/visual.html")]
struct VisualTemplate {
  nav: NavContext,
  phase: &'static str,
  day: u32,
  total_days: usize,
  score: i64,
  image_query: String,
  options: Vec<String>,
  feedback_correct: bool,
  feedback_msg: String,
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load(auth);
  let content = &state.content.visual_words;

  let (image_query, options) = match game.current(content) {
    Some(q) => (q.image_query.clone(), q.options.clone()),
    None => (String::new(), Vec::new()),
  };
  let (feedback_correct, feedback_msg) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => {
      (outcome.correct, feedback_message(t, outcome))
    }
    _ => (false, String::new()),
  };

  let template = VisualTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    day: game.day,
    total_days: content.len(),
    score: game.score,
    image_query,
    options,
    feedback_correct,
    feedback_msg,
  };
  Html(template.render().unwrap_or_default())
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load(auth);

  if let Some(outcome) = game
    .submit(&form.answer, &state.content.visual_words)
    .log_warn("Visual submission rejected")
  {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load(auth);

  if game
    .acknowledge(&state.content.visual_words)
    .log_warn("Visual acknowledge rejected")
    .is_some()
    && game.phase == Phase::Complete
  {
    finish_run(state, GAME_ID, game.day, game.score, None);
  }
  save(auth, game);
  back_to(GAME_ID)
}
