use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as stored in the `posts` bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// Display date, e.g. `October 19, 2026`.
    pub date: String,
    /// Raw HTML, passed through untouched.
    pub body: String,
    pub draft: bool,
}

/// The single editor account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password_hash: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
