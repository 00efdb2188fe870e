//! Story Builder page.

use askama::Template;
use axum::response::{Html, Redirect};

use super::{back_to, finish_run, store, PickForm};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::story::StoryBuilderGame;
use crate::games::{self, Phase};
use crate::handlers::NavContext;
use crate::i18n::Translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;
use crate::store::ProgressStore;

const GAME_ID: &str = "story-builder";

fn key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, GAME_ID)
}

fn load_dealt(state: &AppState, auth: &AuthContext) -> StoryBuilderGame {
  let mut game = match session::get_game(&key(auth)) {
    Some(ActiveGame::Story(game)) => game,
    _ => StoryBuilderGame::new(),
  };
  // A fresh or re-entered machine may still need its story dealt
  if game.phase == Phase::Advancing {
    let _ = game
      .deal(&state.content.stories, &mut rand::rng())
      .log_warn("Story deal failed");
  }
  game
}

fn save(auth: &AuthContext, game: StoryBuilderGame) {
  session::put_game(&key(auth), ActiveGame::Story(game));
}

#[derive(Template)]
#[template(path = "games/story.html")]
struct StoryTemplate {
  nav: NavContext,
  phase: &'static str,
  day: u32,
  total_days: usize,
  score: i64,
  title: String,
  pool: Vec<String>,
  ordered: Vec<String>,
  feedback_correct: bool,
  earned_points: i64,
}

pub fn page(state: &AppState, auth: &AuthContext, t: &'static Translations) -> Html<String> {
  let game = load_dealt(state, auth);
  let content = &state.content.stories;

  let title = game.current(content).map(|s| s.title.clone()).unwrap_or_default();
  let (feedback_correct, earned_points) = match &game.last {
    Some(outcome) if game.phase == Phase::Feedback => (outcome.correct, outcome.score_delta),
    _ => (false, 0),
  };

  let template = StoryTemplate {
    nav: NavContext::new(auth, t),
    phase: match game.phase {
      Phase::Feedback => "feedback",
      Phase::Complete => "complete",
      _ => "answering",
    },
    day: game.day,
    total_days: content.len(),
    score: game.score,
    title,
    pool: game.shuffled.clone(),
    ordered: game.ordered.clone(),
    feedback_correct,
    earned_points,
  };
  save(auth, game);
  Html(template.render().unwrap_or_default())
}

pub fn pick(auth: &AuthContext, form: &PickForm) -> Redirect {
  if let Some(ActiveGame::Story(mut game)) = session::get_game(&key(auth)) {
    let _ = game.pick_sentence(form.index).log_warn("Story pick rejected");
    save(auth, game);
  }
  back_to(GAME_ID)
}

pub fn unpick(auth: &AuthContext, form: &PickForm) -> Redirect {
  if let Some(ActiveGame::Story(mut game)) = session::get_game(&key(auth)) {
    let _ = game.unpick_sentence(form.index).log_warn("Story unpick rejected");
    save(auth, game);
  }
  back_to(GAME_ID)
}

pub fn answer(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load_dealt(state, auth);

  if let Some(outcome) = game
    .submit(&state.content.stories)
    .log_warn("Story submission rejected")
  {
    let progress_store = store(state);
    let _ = games::apply_outcome(&progress_store, &outcome).log_warn("Failed to apply outcome");
    if outcome.correct {
      // A flawless ordering is the one place this game hands out 100%
      let _ = progress_store.add_badge("perfect-score").log_warn("Failed to award badge");
    }
  }
  save(auth, game);
  back_to(GAME_ID)
}

pub fn acknowledge(state: &AppState, auth: &AuthContext) -> Redirect {
  let mut game = load_dealt(state, auth);
  let content = &state.content.stories;

  if game.acknowledge(content).log_warn("Story acknowledge rejected").is_some() {
    match game.phase {
      Phase::Advancing => {
        let _ = game.deal(content, &mut rand::rng()).log_warn("Story deal failed");
      }
      Phase::Complete => {
        finish_run(state, GAME_ID, game.day, game.score, Some("story-teller"));
      }
      _ => {}
    }
  }
  save(auth, game);
  back_to(GAME_ID)
}
