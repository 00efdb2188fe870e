//! Concept Ladder page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, AnswerForm, SelectForm};
use crate::auth::AuthContext;
use crate::content::Subject;
use crate::db::LogOnError;
use crate::games::ladder::ConceptLadderGame;
use crate::games::{self, Phase};
use crate::handlers::{feedback_message, NavContext};
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;

const GAME_ID: &str = "concept-ladder";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load(auth: &AuthContext) -> ConceptLadderGame {
  match session::get_game(&key(auth)) {
    Some(ActiveGame::Ladder(game)) => game,
    _ => ConceptLadderGame::new(),
  }
}

fn save(auth: &AuthContext, game: ConceptLadderGame) {
  session::put_game(&key(auth), ActiveGame::Ladder(game));
}

#[derive(Template)]
#[template(path = "games/ladder.html")]
struct LadderTemplate {
  nav: NavContext,
  phase: &'static str,
  subject: &'static str,
  day: u32,
  step: u32,
  max_step: u32,
  score: i64,
  prompt: String,
  options: Vec<String>,
  explanation: String,
  feedback_correct: bool,
  feedback_msg: String,
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load(auth);
  let content = &state.content;

  let (prompt, options, explanation) = match game.current(content) {
    Some(q) => (q.prompt.clone(), q.options.clone(), q.explanation.clone()),
    None => (String::new(), Vec::new(), String::new()),
  };
  let (feedback_correct, feedback_msg) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => {
      (outcome.correct, feedback_message(t, outcome))
    }
    _ => (false, String::new()),
  };

  let template = LadderTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Selecting => "selecting",
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    subject: game.subject.map(|s| s.as_str()).unwrap_or(""),
    day: game.day,
    step: game.step,
    max_step: game.max_step(content),
    score: game.score,
    prompt,
    options,
    explanation,
    feedback_correct,
    feedback_msg,
  };
  Html(template.render().unwrap_or_default())
}

pub fn select(auth: &AuthContext, form: &SelectForm) -> Redirect {
  let mut game = load(auth);
  let subject = Subject::from_str(&form.choice).unwrap_or(Subject::Science);
  let _ = game.select_subject(subject).log_warn("Ladder subject select rejected");
  save(auth, game);
  back_to(GAME_ID)
}

pub fn answer(state: &AppState, auth: &AuthContext, form: &AnswerForm) -> Redirect {
  let mut game = load(auth);

  if let Some(outcome) = game
    .submit(&form.answer, &state.content)
    .log_warn("Ladder submission rejected")
  {
    let _ = games::apply_outcome(&store(state), &outcome).log_warn("Failed to apply outcome");
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load(auth);

  if game
    .acknowledge(&state.content)
    .log_warn("Ladder acknowledge rejected")
    .is_some()
    && game.phase == Phase::Complete
  {
    let badge = match game.subject {
      Some(Subject::Science) => Some("science-explorer"),
      Some(Subject::Math) => Some("math-warrior"),
      None => None,
    };
    finish_run(state, GAME_ID, game.day, game.score, badge);
  }
  save(auth, game);
  back_to(GAME_ID)
}
