//! Database module: the bucket store and the records kept in it.
//!
//! Layout:
//! - `schema.rs`: SQL DDL and the stable bucket names
//! - `models.rs`: record structs
//! - `sqlite.rs`: the store handle and its transactions

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Post, Session, User};
pub use schema::{Bucket, POSTS, SESSIONS, SQLITE_INIT, USERS};
pub use sqlite::{SqlitePool, Store, Tx};
