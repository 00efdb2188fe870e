//! Home dashboard: streak, level, recent badges, day map.

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::CookieJar;
use chrono::Utc;

use super::{lang_from, NavContext};
use crate::auth::AuthContext;
use crate::config;
use crate::db::LogOnError;
use crate::i18n::translations;
use crate::state::AppState;
use crate::store::{ProgressStore, SqliteStore};

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomeTemplate {
  pub nav: NavContext,
  pub name: String,
  pub avatar: u8,
  pub daily_streak: u32,
  pub level: u32,
  pub total_score: i64,
  pub badge_icons: Vec<&'static str>,
  pub completed_days: Vec<u32>,
}

pub async fn index(State(state): State<AppState>, auth: AuthContext, jar: CookieJar) -> Html<String> {
  let t = translations(lang_from(&jar));
  let store = SqliteStore::new(state.pool.clone());

  // Visiting home counts as today's session
  let progress = store
    .update_daily_streak(Utc::now().date_naive())
    .log_warn("Failed to update daily streak")
    .unwrap_or_default();

  if progress.daily_streak >= config::STREAK_BADGE_DAYS {
    let _ = store.add_badge("streak-keeper").log_warn("Failed to award streak badge");
  }

  // Most recent badges, newest last like the original wall
  let badge_icons: Vec<&'static str> = progress
    .badges
    .iter()
    .rev()
    .take(5)
    .filter_map(|id| config::get_badge_info(id).map(|b| b.icon))
    .collect();

  let template = HomeTemplate {
    nav: NavContext::new(&auth, t),
    name: if progress.name.is_empty() { auth.username.clone() } else { progress.name.clone() },
    avatar: progress.avatar,
    daily_streak: progress.daily_streak,
    level: progress.level,
    total_score: progress.total_score,
    badge_icons,
    completed_days: progress.completed_days.clone(),
  };
  Html(template.render().unwrap_or_default())
}
