//! Authentication handlers for login, register, and logout.

use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use super::middleware::SESSION_COOKIE_NAME;
use super::password;
use crate::config;
use crate::db::{self, Role};
use crate::session::generate_session_id;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub version: &'static str,
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    /// "student" or "teacher"
    #[serde(default)]
    pub role: String,
}

fn login_error(jar: CookieJar, message: &str) -> axum::response::Response {
    let template = LoginTemplate {
        error: Some(message.to_string()),
        version: env!("CARGO_PKG_VERSION"),
    };
    (jar, Html(template.render().unwrap_or_default())).into_response()
}

fn register_error(jar: CookieJar, message: &str) -> axum::response::Response {
    let template = RegisterTemplate { error: Some(message.to_string()) };
    (jar, Html(template.render().unwrap_or_default())).into_response()
}

/// GET /login - Show login page
pub async fn login_page() -> Html<String> {
    let template = LoginTemplate {
        error: None,
        version: env!("CARGO_PKG_VERSION"),
    };
    Html(template.render().unwrap_or_default())
}

/// POST /login - Process login
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    if form.username.is_empty() || form.password.is_empty() {
        return login_error(jar, "Username and password are required");
    }

    let conn = match db::try_lock(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return login_error(jar, "Database error"),
    };

    let user = match db::get_user_by_username(&conn, &form.username) {
        Ok(Some(user)) => user,
        Ok(None) => return login_error(jar, "Invalid username or password"),
        Err(_) => return login_error(jar, "Database error"),
    };

    if !password::verify_password(&form.password, &user.password_hash) {
        return login_error(jar, "Invalid username or password");
    }

    if let Err(e) = db::update_last_login(&conn, user.id) {
        tracing::warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // Login is a natural point to sweep out stale sessions
    if let Err(e) = db::cleanup_expired_sessions(&conn) {
        tracing::warn!("Failed to clean up expired sessions: {}", e);
    }

    let session_id = generate_session_id();
    if db::create_session(&conn, user.id, &session_id, config::SESSION_DURATION_HOURS).is_err() {
        return login_error(jar, "Failed to create session");
    }
    drop(conn);

    let session_cookie = Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .secure(false) // localhost deployment, no TLS
        .max_age(time::Duration::hours(config::SESSION_DURATION_HOURS))
        .build();

    (jar.add(session_cookie), Redirect::to("/")).into_response()
}

/// GET /register - Show registration page
pub async fn register_page() -> Html<String> {
    let template = RegisterTemplate { error: None };
    Html(template.render().unwrap_or_default())
}

/// POST /register - Create the account and log straight in
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> impl IntoResponse {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return register_error(jar, "Username and password are required");
    }
    let role = Role::from_str(&form.role).unwrap_or(Role::Student);

    let password_hash = match password::hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return register_error(jar, "Registration failed");
        }
    };

    let conn = match db::try_lock(&state.pool) {
        Ok(conn) => conn,
        Err(_) => return register_error(jar, "Database error"),
    };

    let user_id = match db::create_user(&conn, form.username.trim(), &password_hash, role) {
        Ok(id) => id,
        Err(_) => return register_error(jar, "That username is already taken"),
    };

    let session_id = generate_session_id();
    if db::create_session(&conn, user_id, &session_id, config::SESSION_DURATION_HOURS).is_err() {
        return register_error(jar, "Failed to create session");
    }
    drop(conn);

    let session_cookie = Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .secure(false)
        .max_age(time::Duration::hours(config::SESSION_DURATION_HOURS))
        .build();

    (jar.add(session_cookie), Redirect::to("/")).into_response()
}

/// GET /logout - Drop the session and return to login
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if let Ok(conn) = db::try_lock(&state.pool) {
            if let Err(e) = db::delete_session(&conn, cookie.value()) {
                tracing::warn!("Failed to delete session: {}", e);
            }
        }
    }
    let removal = Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build();
    (jar.remove(removal), Redirect::to("/login"))
}
