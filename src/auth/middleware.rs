//! Authentication middleware and extractors.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::db::{self, Role};
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "verbora_session";

/// Authenticated request context.
/// Add this as a handler parameter to require authentication.
/// Redirects to /login if not authenticated.
#[derive(Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    /// Session id, also the key for in-memory game state
    pub session_id: String,
}

impl AuthContext {
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login").into_response())?;

        let session_id = jar
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or_else(|| Redirect::to("/login").into_response())?;

        let conn = db::try_lock(&state.pool)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response())?;

        let user = db::get_session_user(&conn, &session_id)
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response())?
            .ok_or_else(|| Redirect::to("/login").into_response())?;

        Ok(AuthContext {
            user_id: user.id,
            username: user.username,
            role: user.role,
            session_id,
        })
    }
}
