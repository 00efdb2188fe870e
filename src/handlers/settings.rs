//! Settings: display name, avatar, language.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use super::{lang_from, NavContext};
use crate::auth::AuthContext;
use crate::config;
use crate::db::LogOnError;
use crate::i18n::{self, translations, Lang};
use crate::state::AppState;
use crate::store::{ProgressStore, SqliteStore};

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
  pub nav: NavContext,
  pub name: String,
  pub avatar: u8,
  pub avatar_count: u8,
  pub lang: &'static str,
}

#[derive(Deserialize)]
pub struct ProfileForm {
  pub name: String,
}

#[derive(Deserialize)]
pub struct LanguageForm {
  pub lang: String,
}

pub async fn page(State(state): State<AppState>, auth: AuthContext, jar: CookieJar) -> Html<String> {
  let lang = lang_from(&jar);
  let t = translations(lang);
  let progress = SqliteStore::new(state.pool.clone())
    .get_or_init()
    .log_warn("Failed to load progress")
    .unwrap_or_default();

  let template = SettingsTemplate {
    nav: NavContext::new(&auth, t),
    name: progress.name.clone(),
    avatar: progress.avatar,
    avatar_count: config::AVATAR_COUNT,
    lang: lang.as_str(),
  };
  Html(template.render().unwrap_or_default())
}

/// POST /settings - Rename the learner
pub async fn update_profile(
  State(state): State<AppState>,
  _auth: AuthContext,
  Form(form): Form<ProfileForm>,
) -> Redirect {
  let store = SqliteStore::new(state.pool.clone());
  if let Some(mut progress) = store.get_or_init().log_warn("Failed to load progress") {
    let name = form.name.trim();
    if !name.is_empty() {
      progress.name = name.to_string();
      let _ = store.save(&progress).log_warn("Failed to save profile");
    }
  }
  Redirect::to("/settings")
}

/// POST /settings/avatar - Cycle to the next avatar
pub async fn cycle_avatar(State(state): State<AppState>, _auth: AuthContext) -> Redirect {
  let store = SqliteStore::new(state.pool.clone());
  if let Some(mut progress) = store.get_or_init().log_warn("Failed to load progress") {
    progress.avatar = (progress.avatar % config::AVATAR_COUNT) + 1;
    let _ = store.save(&progress).log_warn("Failed to save profile");
  }
  Redirect::to("/settings")
}

/// POST /settings/language - Switch the UI language cookie
pub async fn set_language(
  _auth: AuthContext,
  jar: CookieJar,
  Form(form): Form<LanguageForm>,
) -> impl IntoResponse {
  let lang = Lang::from_str(&form.lang).unwrap_or_default();
  let cookie = Cookie::build((i18n::LANG_COOKIE_NAME, lang.as_str()))
    .path("/")
    .http_only(false)
    .build();
  (jar.add(cookie), Redirect::to("/settings"))
}
