use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::debug;

use crate::db::Post;
use crate::handlers::Outcome;
use crate::{BlotterError, router::BlotterState};

/// Editor form. Any non-empty `draft` value marks the post as a draft.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub draft: String,
}

impl PostForm {
    fn is_draft(&self) -> bool {
        !self.draft.is_empty()
    }
}

/// POST /post/create
pub async fn create_post(
    State(state): State<BlotterState>,
    Form(form): Form<PostForm>,
) -> Result<Outcome, BlotterError> {
    state
        .posts
        .create(&form.title, &form.post, form.is_draft())
        .await?;
    Ok(Outcome::success(Redirect::to("/")))
}

/// POST /post/update/{id}
pub async fn update_post(
    State(state): State<BlotterState>,
    Path(id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Outcome, BlotterError> {
    state
        .posts
        .update(&id, &form.title, &form.post, form.is_draft())
        .await?;
    Ok(Outcome::success(Redirect::to("/")))
}

/// GET /delete/{id}
pub async fn delete_post(
    State(state): State<BlotterState>,
    Path(id): Path<String>,
) -> Result<Outcome, BlotterError> {
    if state.posts.delete(&id).await? {
        Ok(Outcome::success(Redirect::to("/dashboard")))
    } else {
        debug!(id = %id, "delete requested for a post that does not exist");
        Ok(Outcome::recovered(Redirect::to("/dashboard")))
    }
}

/// GET / -> published posts only.
pub async fn index(State(state): State<BlotterState>) -> Result<Json<Vec<Post>>, BlotterError> {
    Ok(Json(state.posts.list(false).await?))
}

/// GET /dashboard -> every post, drafts included.
pub async fn dashboard(State(state): State<BlotterState>) -> Result<Json<Vec<Post>>, BlotterError> {
    Ok(Json(state.posts.list(true).await?))
}

/// GET /post/{id} and GET /edit/{id}
pub async fn post_by_id(
    State(state): State<BlotterState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, BlotterError> {
    Ok(Json(state.posts.get(&id).await?))
}
