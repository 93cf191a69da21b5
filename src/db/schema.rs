//! SQL DDL for the bucket store plus the bucket names the rest of the crate uses.
//!
//! Every bucket shares one `entries` table partitioned by the `bucket` column.
//! Keys are BLOBs so a scan returns them in byte order, the same order a
//! B+tree key-value engine would.

/// SQLite schema with:
/// - `entries` keyed by (`bucket`, `key`), WITHOUT ROWID so rows are stored in key order
/// - `sequences` holding one monotonically increasing counter per bucket
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    bucket TEXT NOT NULL,
    key BLOB NOT NULL,
    value BLOB NOT NULL,
    PRIMARY KEY (bucket, key)
) WITHOUT ROWID;

CREATE TABLE IF NOT EXISTS sequences (
    bucket TEXT PRIMARY KEY,
    value INTEGER NOT NULL
);
"#;

/// A named partition of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bucket(&'static str);

impl Bucket {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn name(&self) -> &'static str {
        self.0
    }
}

/// username -> PHC-encoded password hash
pub const USERS: Bucket = Bucket::new("users");

/// session token -> expiry formatted as `YYYY-MM-DD HH:MM:SS`
pub const SESSIONS: Bucket = Bucket::new("sessions");

/// decimal post id -> JSON encoded [`Post`](crate::db::models::Post)
pub const POSTS: Bucket = Bucket::new("posts");
