//! Progress page: skill tree, badge wall, per-game records.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::CookieJar;

use super::{lang_from, NavContext};
use crate::auth::AuthContext;
use crate::config;
use crate::db::LogOnError;
use crate::i18n::translations;
use crate::state::AppState;
use crate::store::{ProgressStore, SqliteStore};

pub struct BadgeRow {
  pub icon: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub earned: bool,
}

pub struct GameRow {
  pub name: &'static str,
  pub level: u32,
  pub high_score: i64,
  pub completed: bool,
}

#[derive(Template)]
#[template(path = "progress.html")]
pub struct ProgressTemplate {
  pub nav: NavContext,
  pub level: u32,
  pub total_score: i64,
  pub daily_streak: u32,
  pub vocabulary: u8,
  pub logic: u8,
  pub creativity: u8,
  pub speed: u8,
  pub badge_count: usize,
  pub badges: Vec<BadgeRow>,
  pub games: Vec<GameRow>,
  pub completed_day_count: usize,
}

pub async fn page(State(state): State<AppState>, auth: AuthContext, jar: CookieJar) -> Html<String> {
  let t = translations(lang_from(&jar));
  let progress = SqliteStore::new(state.pool.clone())
    .get_or_init()
    .log_warn("Failed to load progress")
    .unwrap_or_default();

  let badges: Vec<BadgeRow> = config::BADGES
    .iter()
    .map(|b| BadgeRow {
      icon: b.icon,
      name: b.name,
      description: b.description,
      earned: progress.badges.iter().any(|earned| earned == b.id),
    })
    .collect();

  let games: Vec<GameRow> = config::GAMES
    .iter()
    .filter_map(|g| {
      progress.games_progress.get(g.id).map(|p| GameRow {
        name: g.name,
        level: p.current_level,
        high_score: p.high_score,
        completed: p.completed,
      })
    })
    .collect();

  let template = ProgressTemplate {
    nav: NavContext::new(&auth, t),
    level: progress.level,
    total_score: progress.total_score,
    daily_streak: progress.daily_streak,
    vocabulary: progress.skills.vocabulary,
    logic: progress.skills.logic,
    creativity: progress.skills.creativity,
    speed: progress.skills.speed,
    badge_count: progress.badges.len(),
    badges,
    games,
    completed_day_count: progress.completed_days.len(),
  };
  Html(template.render().unwrap_or_default())
}
