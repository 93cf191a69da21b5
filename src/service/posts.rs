use crate::db::{POSTS, Post, Store};
use crate::error::BlotterError;
use chrono::{DateTime, Local};
use tracing::info;

/// Post records keyed by their decimal id, backed by the `posts` bucket.
#[derive(Clone)]
pub struct ContentStore {
    store: Store,
}

impl ContentStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Store a new post under the next value of the bucket sequence.
    pub async fn create(&self, title: &str, body: &str, draft: bool) -> Result<Post, BlotterError> {
        validate_fields(title, body)?;

        let mut tx = self.store.update().await?;
        let id = tx.next_sequence(POSTS).await?;
        let post = Post {
            id,
            title: title.to_string(),
            date: display_date(Local::now()),
            body: body.to_string(),
            draft,
        };
        tx.put(POSTS, id.to_string().as_bytes(), &serde_json::to_vec(&post)?)
            .await?;
        tx.commit().await?;

        info!(id, draft, "post created");
        Ok(post)
    }

    /// Overwrite the post at `id`, creating it when absent. The date is always
    /// re-stamped to today.
    pub async fn update(
        &self,
        id: &str,
        title: &str,
        body: &str,
        draft: bool,
    ) -> Result<Post, BlotterError> {
        validate_fields(title, body)?;
        let id = id
            .trim()
            .parse::<i64>()
            .map_err(|_| BlotterError::validation(format!("post id `{id}` is not an integer")))?;

        let post = Post {
            id,
            title: title.to_string(),
            date: display_date(Local::now()),
            body: body.to_string(),
            draft,
        };
        let mut tx = self.store.update().await?;
        tx.put(POSTS, id.to_string().as_bytes(), &serde_json::to_vec(&post)?)
            .await?;
        tx.commit().await?;

        info!(id, draft, "post updated");
        Ok(post)
    }

    pub async fn get(&self, id: &str) -> Result<Post, BlotterError> {
        let Some(key) = post_key(id) else {
            return Err(BlotterError::not_found(format!("post {id}")));
        };

        let mut tx = self.store.view().await?;
        let raw = tx.get(POSTS, key.as_bytes()).await?;
        tx.rollback().await?;

        let raw = raw.ok_or_else(|| BlotterError::not_found(format!("post {id}")))?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Every post in key order. Keys are decimal strings compared bytewise,
    /// so `10` sorts before `2`.
    pub async fn list(&self, include_drafts: bool) -> Result<Vec<Post>, BlotterError> {
        let mut tx = self.store.view().await?;
        let rows = tx.scan(POSTS).await?;
        tx.rollback().await?;

        let mut posts = Vec::with_capacity(rows.len());
        for (_key, value) in rows {
            let post: Post = serde_json::from_slice(&value)?;
            if include_drafts || !post.draft {
                posts.push(post);
            }
        }
        Ok(posts)
    }

    /// Remove the post at `id`. Returns whether anything was removed; a missing
    /// post is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool, BlotterError> {
        let Some(key) = post_key(id) else {
            return Ok(false);
        };

        let mut tx = self.store.update().await?;
        let removed = tx.delete(POSTS, key.as_bytes()).await?;
        tx.commit().await?;

        if removed {
            info!(id = %key, "post deleted");
        }
        Ok(removed)
    }
}

/// `October 19, 2026`
pub fn display_date<Tz: chrono::TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%B %-d, %Y").to_string()
}

fn validate_fields(title: &str, body: &str) -> Result<(), BlotterError> {
    if body.is_empty() {
        return Err(BlotterError::validation("must have post text"));
    }
    if title.is_empty() {
        return Err(BlotterError::validation("must have post title"));
    }
    Ok(())
}

/// Canonical bucket key for a caller-supplied id, `None` when it is not an integer.
fn post_key(id: &str) -> Option<String> {
    id.trim().parse::<i64>().ok().map(|n| n.to_string())
}
