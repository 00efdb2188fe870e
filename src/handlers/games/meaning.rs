//! Match the Meaning page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::meaning::MatchMeaningGame;
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "match-meaning";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load_dealt(state: &AppState, auth: &AuthContext) -> MatchMeaningGame {
  let mut game = match session::get_game(&key(auth)) {
    Some(ActiveGame::Meaning(game)) => game,
    _ => MatchMeaningGame::new(),
  };
  if game.phase == Phase::Advancing {
    let _ = game
      .deal(&state.content.meaning_pairs, &mut rand::rng())
      .log_warn("Meaning deal failed");
  }
  game
}

fn save(auth: &AuthContext, game: MatchMeaningGame) {
  session::put_game(&key(auth), ActiveGame::Meaning(game));
}

#[derive(Template)]
#[template(path = "games/meaning.html")]
struct MeaningTemplate {
  nav: NavContext,
  phase: &'static str,
  day: u32,
  total_days: usize,
  score: i64,
  word: String,
  choices: Vec<String>,
  feedback_correct: bool,
  feedback_msg: String,
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load_dealt(state, auth);
  let content = &state.content.meaning_pairs;

  let word = game.current(content).map(|p| p.word.clone()).unwrap_or_default();
  let (feedback_correct, feedback_msg) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => {
      (outcome.correct, feedback_message(t, outcome))
    }
    _ => (false, String::new()),
  };

  let template = MeaningTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    day: game.day,
    total_days: content.len(),
    score: game.score,
    word,
    choices: game.choices.clone(),
    feedback_correct,
    feedback_msg,
  };
  save(auth, game);
  Html(template.render().unwrap_or_default())
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load_dealt(state, auth);

  if let Some(outcome) = game
    .submit(&form.answer, &state.content.meaning_pairs)
    .log_warn("Meaning submission rejected")
  {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load_dealt(state, auth);
  let content = &state.content.meaning_pairs;

  if game.acknowledge(content).log_warn("Meaning acknowledge rejected").is_some() {
    match game.phase {
      Phase::Advancing => {
        let _ = game.deal(content, &mut rand::rng()).log_warn("Meaning deal failed");
      }
      Phase::Complete => {
        finish_run(state, GAME_ID, game.day, game.score, Some("word-wizard"));
      }
      _ => {}
    }
  }
  save(auth, game);
  back_to(GAME_ID)
}
