//! Teacher dashboard: class overview and the quiz room.
//!
//! The quiz room scoreboard is a local simulation - classmate answers come
//! from an RNG, standing in for a future real-time backend.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::{lang_from, NavContext};
use crate::auth::AuthContext;
use crate::db::LogOnError;
use crate::games::quiz_room::QuizRoom;
use crate::games::Phase;
use crate::i18n::translations;
use crate::session::{self, ActiveGame};
use crate::state::AppState;
use crate::store::{ProgressStore, SqliteStore};

const ROOM_KEY: &str = "quiz-room";

/// Simulated roster joining every quiz room
const CLASSMATES: [&str; 3] = ["Asha", "Ravi", "Meera"];

/// Questions per quiz room session
const ROOM_QUESTIONS: usize = 5;

fn room_key(auth: &AuthContext) -> String {
  session::game_key(&auth.session_id, ROOM_KEY)
}

fn load_room(auth: &AuthContext) -> Option<QuizRoom> {
  match session::get_game(&room_key(auth)) {
    Some(ActiveGame::Room(room)) => Some(room),
    _ => None,
  }
}

fn teacher_only(auth: &AuthContext) -> Result<(), Response> {
  if auth.is_teacher() {
    Ok(())
  } else {
    Err(Redirect::to("/").into_response())
  }
}

pub struct ScoreRow {
  pub student: String,
  pub score: i64,
}

#[derive(Template)]
#[template(path = "teacher.html")]
pub struct TeacherTemplate {
  pub nav: NavContext,
  pub student_level: u32,
  pub badge_count: usize,
  pub total_score: i64,
  pub completed_day_count: usize,
  // Quiz room section
  pub room_active: bool,
  pub room_finished: bool,
  pub room_title: String,
  pub question_number: usize,
  pub question_count: usize,
  pub prompt: String,
  pub options: Vec<String>,
  pub scoreboard: Vec<ScoreRow>,
}

#[derive(Deserialize)]
pub struct RoomAnswerForm {
  pub index: usize,
}

pub async fn panel(State(state): State<AppState>, auth: AuthContext, jar: CookieJar) -> Response {
  if let Err(redirect) = teacher_only(&auth) {
    return redirect;
  }
  let t = translations(lang_from(&jar));
  let progress = SqliteStore::new(state.pool.clone())
    .get_or_init()
    .log_warn("Failed to load progress")
    .unwrap_or_default();

  let room = load_room(&auth);
  let (room_active, room_finished, room_title, question_number, question_count, prompt, options, scoreboard) =
    match &room {
      Some(room) => (
        room.phase == Phase::Answering,
        room.phase == Phase::Complete,
        room.title.clone(),
        room.current + 1,
        room.questions.len(),
        room.current_question().map(|q| q.prompt.clone()).unwrap_or_default(),
        room.current_question().map(|q| q.options.clone()).unwrap_or_default(),
        room
          .scoreboard()
          .into_iter()
          .map(|e| ScoreRow { student: e.student, score: e.score })
          .collect(),
      ),
      None => (false, false, String::new(), 0, 0, String::new(), Vec::new(), Vec::new()),
    };

  let template = TeacherTemplate {
    nav: NavContext::new(&auth, t),
    student_level: progress.level,
    badge_count: progress.badges.len(),
    total_score: progress.total_score,
    completed_day_count: progress.completed_days.len(),
    room_active,
    room_finished,
    room_title,
    question_number,
    question_count,
    prompt,
    options,
    scoreboard,
  };
  Html(template.render().unwrap_or_default()).into_response()
}

/// POST /teacher/quiz/start - Open a room over the quiz table
pub async fn quiz_start(State(state): State<AppState>, auth: AuthContext) -> Response {
  if let Err(redirect) = teacher_only(&auth) {
    return redirect;
  }
  let questions: Vec<_> = state
    .content
    .quiz_questions
    .iter()
    .take(ROOM_QUESTIONS)
    .cloned()
    .collect();
  let classmates = CLASSMATES.iter().map(|c| c.to_string()).collect();
  let room = QuizRoom::new("Mixed Quiz", questions, classmates);
  session::put_game(&room_key(&auth), ActiveGame::Room(room));
  Redirect::to("/teacher").into_response()
}

/// POST /teacher/quiz/answer - The live student answers, classmates follow
pub async fn quiz_answer(auth: AuthContext, Form(form): Form<RoomAnswerForm>) -> Response {
  if let Err(redirect) = teacher_only(&auth) {
    return redirect;
  }
  if let Some(mut room) = load_room(&auth) {
    let _ = room.record_answer("Student", form.index).log_warn("Room answer rejected");
    let _ = room
      .simulate_classmates(&mut rand::rng())
      .log_warn("Room simulation failed");
    session::put_game(&room_key(&auth), ActiveGame::Room(room));
  }
  Redirect::to("/teacher").into_response()
}

/// POST /teacher/quiz/advance - Close the question, show the next
pub async fn quiz_advance(auth: AuthContext) -> Response {
  if let Err(redirect) = teacher_only(&auth) {
    return redirect;
  }
  if let Some(mut room) = load_room(&auth) {
    let _ = room.advance().log_warn("Room advance rejected");
    session::put_game(&room_key(&auth), ActiveGame::Room(room));
  }
  Redirect::to("/teacher").into_response()
}

/// POST /teacher/quiz/end - Tear the room down
pub async fn quiz_end(auth: AuthContext) -> Response {
  if let Err(redirect) = teacher_only(&auth) {
    return redirect;
  }
  session::remove_game(&room_key(&auth));
  Redirect::to("/teacher").into_response()
}
