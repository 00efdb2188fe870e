//! Time Travel Questions page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::time_travel::{TimeTravelGame, TOTAL_QUESTIONS};
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "time-travel";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load(auth: &AuthContext) -> TimeTravelGame {
  match session::get_game(&key(auth)) {
    Some(ActiveGame::TimeTravel(game)) => game,
    _ => TimeTravelGame::new(),
  }
}

fn save(auth: &AuthContext, game: TimeTravelGame) {
  session::put_game(&key(auth), ActiveGame::TimeTravel(game));
}

#[derive(Template)]
#[template(path = "games/time_travel.html")]
struct TimeTravelTemplate {
  nav: NavContext,
  phase: &'static str,
  question_number: u32,
  total_questions: u32,
  difficulty: u8,
  score: i64,
  prompt: String,
  options: Vec<String>,
  feedback_correct: bool,
  feedback_msg: String,
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load(auth);
  let content = &state.content.quiz_questions;

  let (prompt, options) = match game.current(content) {
    Some(q) => (q.prompt.clone(), q.options.clone()),
    None => (String::new(), Vec::new()),
  };
  let (feedback_correct, feedback_msg) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => {
      (outcome.correct, feedback_message(t, outcome))
    }
    _ => (false, String::new()),
  };

  let template = TimeTravelTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    question_number: game.question_number + 1,
    total_questions: TOTAL_QUESTIONS,
    difficulty: game.difficulty(),
    score: game.score,
    prompt,
    options,
    feedback_correct,
    feedback_msg,
  };
  Html(template.render().unwrap_or_default())
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load(auth);
  let index = form.index.unwrap_or(usize::MAX);

  if let Some(outcome) = game
    .submit(index, &state.content.quiz_questions)
    .log_warn("Time travel submission rejected")
  {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load(auth);

  if game.acknowledge().log_warn("Time travel acknowledge rejected").is_some()
    && game.phase == Phase::Complete
  {
    finish_run(state, GAME_ID, game.question_number, game.score, None);
  }
  save(auth, game);
  back_to(GAME_ID)
}
