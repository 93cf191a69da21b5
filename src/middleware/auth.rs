use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use std::future::Future;
use tracing::debug;

use crate::error::{AuthError, BlotterError};
use crate::router::BlotterState;
use crate::service::SessionStore;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Ensure the caller presented a live session token.
///
/// The returned error keeps the precise reason for logging, but it always
/// renders as the same generic 401.
pub async fn ensure_session(
    sessions: &SessionStore,
    token: Option<&str>,
) -> Result<(), BlotterError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        debug!("rejecting request without session cookie");
        return Err(AuthError::MissingCookie.into());
    };

    sessions.validate(token).await.inspect_err(|e| {
        debug!(reason = %e, "rejecting request with invalid session");
    })
}

/// Run `op` only if `token` names a live session; its result is passed through untouched.
pub async fn protected<F, Fut, T>(
    sessions: &SessionStore,
    token: Option<&str>,
    op: F,
) -> Result<T, BlotterError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, BlotterError>>,
{
    ensure_session(sessions, token).await?;
    op().await
}

/// Route layer guarding the editor routes with the `session` cookie.
pub async fn require_session(
    State(state): State<BlotterState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Result<Response, BlotterError> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    protected(&state.sessions, token.as_deref(), move || async move {
        Ok(next.run(request).await)
    })
    .await
}
