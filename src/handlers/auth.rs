use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::info;

use crate::handlers::Outcome;
use crate::middleware::SESSION_COOKIE;
use crate::{BlotterError, router::BlotterState};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login -> verifies the editor's credentials, then sets a fresh `session` cookie.
pub async fn login(
    State(state): State<BlotterState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Outcome, BlotterError> {
    if form.username.is_empty() {
        return Err(BlotterError::validation("must have username to login"));
    }
    if form.password.is_empty() {
        return Err(BlotterError::validation("must have password to login"));
    }

    state
        .credentials
        .verify(&form.username, &form.password)
        .await?;

    let session = state.sessions.issue().await?;
    let cookie = build_session_cookie(session.token, session.expires_at, state.secure_cookie)?;

    info!(username = %form.username, "editor logged in");
    Ok(Outcome::success((jar.add(cookie), Redirect::to("/"))))
}

fn build_session_cookie(
    token: String,
    expires_at: DateTime<Utc>,
    secure: bool,
) -> Result<Cookie<'static>, BlotterError> {
    let expires = OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .map_err(|e| BlotterError::Unexpected(format!("cookie expiry out of range: {e}")))?;

    Ok(Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .expires(expires)
        .build())
}
