//! Parallel Sentence page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm, PickForm, SelectForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::parallel::{ParallelMode, ParallelSentenceGame};
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "parallel-sentence";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load(auth: &AuthContext) -> ParallelSentenceGame {
  match session::get_game(&key(auth)) {
    Some(ActiveGame::Parallel(game)) => game,
    _ => ParallelSentenceGame::new(),
  }
}

fn save(auth: &AuthContext, game: ParallelSentenceGame) {
  session::put_game(&key(auth), ActiveGame::Parallel(game));
}

#[derive(Template)]
#[template(path = "games/parallel.html")]
struct ParallelTemplate {
  nav: NavContext,
  phase: &'static str,
  mode: &'static str,
  day: u32,
  total_days: usize,
  score: i64,
  english: String,
  choices: Vec<String>,
  word_bank: Vec<String>,
  picked: Vec<String>,
  feedback_correct: bool,
  feedback_msg: String,
  suggestions: Vec<String>,
}

fn phase_str(phase: Phase) -> &'static str {
  match phase {
    Phase::Selecting => "selecting",
    Phase::Answering => "answering",
    Phase::Feedback => "feedback",
    Phase::Advancing => "advancing",
    Phase::Complete => "complete",
  }
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load(auth);
  let content = &state.content.sentences;

  let english = game
    .current(content)
    .map(|q| q.english.clone())
    .unwrap_or_default();
  let (feedback_correct, feedback_msg, suggestions) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => (
      outcome.correct,
      feedback_message(t, outcome),
      outcome
        .verdict
        .as_ref()
        .map(|v| v.suggestions.clone())
        .unwrap_or_default(),
    ),
    _ => (false, String::new(), Vec::new()),
  };

  let template = ParallelTemplate {
    nav: NavContext::new(auth, t),
    phase: phase_str(game.phase),
    mode: match game.mode {
      Some(ParallelMode::Match) => "match",
      Some(ParallelMode::Rearrange) => "rearrange",
      None => "",
    },
    day: game.day,
    total_days: content.len(),
    score: game.score,
    english,
    choices: game.choices.clone(),
    word_bank: game.word_bank.clone(),
    picked: game.picked.clone(),
    feedback_correct,
    feedback_msg,
    suggestions,
  };
  Html(template.render().unwrap_or_default())
}

pub fn select(state: &AppState, auth: &AuthContext, form: &SelectForm) -> Redirect {
  let mut game = load(auth);
  let mode = match form.choice.as_str() {
    "rearrange" => ParallelMode::Rearrange,
    _ => ParallelMode::Match,
  };
  let _ = game
    .select_mode(mode, &state.content.sentences, &mut rand::rng())
    .log_warn("Parallel mode select rejected");
  save(auth, game);
  back_to(GAME_ID)
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load(auth);
  let content = &state.content.sentences;

  let submitted = match game.mode {
    Some(ParallelMode::Match) => game.submit_match(&form.answer, content),
    Some(ParallelMode::Rearrange) => game.submit_rearranged(content),
    None => {
      save(auth, game);
      return back_to(GAME_ID);
    }
  };

  if let Some(outcome) = submitted.log_warn("Parallel submission rejected") {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn pick(auth: &AuthContext, form: &PickForm) -> Redirect {
  let mut game = load(auth);
  let _ = game.pick_word(form.index).log_warn("Parallel pick rejected");
  save(auth, game);
  back_to(GAME_ID)
}

pub fn unpick(auth: &AuthContext, form: &PickForm) -> Redirect {
  let mut game = load(auth);
  let _ = game.unpick_word(form.index).log_warn("Parallel unpick rejected");
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load(auth);
  let content = &state.content.sentences;

  if game.acknowledge(content).log_warn("Parallel acknowledge rejected").is_some() {
    match game.phase {
      Phase::Advancing => {
        let _ = game.deal(content, &mut rand::rng()).log_warn("Parallel deal failed");
      }
      Phase::Complete => {
        finish_run(state, GAME_ID, game.day, game.score, None);
      }
      _ => {}
    }
  }
  save(auth, game);
  back_to(GAME_ID)
}
