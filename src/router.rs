use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::db::Store;
use crate::handlers::{auth, posts};
use crate::middleware::require_session;
use crate::service::{ContentStore, CredentialStore, SessionStore};

/// Shared state handed to every handler. Each service holds a clone of the
/// same process-wide [`Store`].
#[derive(Clone)]
pub struct BlotterState {
    pub credentials: CredentialStore,
    pub sessions: SessionStore,
    pub posts: ContentStore,
    pub secure_cookie: bool,
}

impl BlotterState {
    pub fn new(store: Store, secure_cookie: bool) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            sessions: SessionStore::new(store.clone()),
            posts: ContentStore::new(store),
            secure_cookie,
        }
    }
}

pub fn blotter_router(state: BlotterState) -> Router {
    let editor = Router::new()
        .route("/post/create", post(posts::create_post))
        .route("/post/update/{id}", post(posts::update_post))
        .route("/delete/{id}", get(posts::delete_post))
        .route("/dashboard", get(posts::dashboard))
        .route("/edit/{id}", get(posts::post_by_id))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/", get(posts::index))
        .route("/post/{id}", get(posts::post_by_id))
        .route("/login", post(auth::login))
        .merge(editor)
        .with_state(state)
}
