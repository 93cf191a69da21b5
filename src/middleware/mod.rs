pub mod auth;

pub use auth::{SESSION_COOKIE, ensure_session, protected, require_session};
