//! Quiz Battle Arena page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm, SelectForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::quiz::{BattleMode, QuizBattleGame, QUESTION_SECONDS, TOTAL_QUESTIONS};
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "quiz-battle";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load(auth: &AuthContext) -> QuizBattleGame {
  match session::get_game(&key(auth)) {
    Some(ActiveGame::QuizBattle(game)) => game,
    _ => QuizBattleGame::new(),
  }
}

fn save(auth: &AuthContext, game: QuizBattleGame) {
  session::put_game(&key(auth), ActiveGame::QuizBattle(game));
}

#[derive(Template)]
#[template(path = "games/quiz.html")]
struct QuizTemplate {
  nav: NavContext,
  phase: &'static str,
  versus_rival: bool,
  question_number: u32,
  total_questions: u32,
  question_seconds: u32,
  player_score: i64,
  rival_score: i64,
  prompt: String,
  options: Vec<String>,
  feedback_correct: bool,
  feedback_msg: String,
  player_won: bool,
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

  let template = QuizTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Selecting => "selecting",
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    versus_rival: game.mode == Some(BattleMode::VersusRival),
    question_number: game.questions_answered + 1,
    total_questions: TOTAL_QUESTIONS,
    question_seconds: QUESTION_SECONDS,
    player_score: game.player_score,
    rival_score: game.rival_score,
    prompt,
    options,
    feedback_correct,
    feedback_msg,
    player_won: game.player_won(),
  };
  Html(template.render().unwrap_or_default())
}

pub fn select(auth: &AuthContext, form: &SelectForm) -> Redirect {
  let mut game = load(auth);
  let mode = match form.choice.as_str() {
    "player" => BattleMode::VersusPlayer,
    _ => BattleMode::VersusRival,
  };
  let _ = game.select_mode(mode).log_warn("Battle mode select rejected");
  save(auth, game);
  back_to(GAME_ID)
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load(auth);
  let time_left = form.time_left.unwrap_or(0).min(QUESTION_SECONDS);
  // An empty answer field is the timeout path
  let answer = if form.answer.is_empty() { None } else { Some(form.answer.as_str()) };

  if let Some(outcome) = game
    .submit(answer, time_left, &state.content.quiz_questions, &mut rand::rng())
    .log_warn("Battle submission rejected")
  {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load(auth);

  if game.acknowledge().log_warn("Battle acknowledge rejected").is_some()
    && game.phase == Phase::Complete
  {
    let badge = game.player_won().then_some("speed-master");
    finish_run(state, GAME_ID, game.questions_answered, game.player_score, badge);
  }
  save(auth, game);
  back_to(GAME_ID)
}
