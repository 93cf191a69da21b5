use crate::db::{SESSIONS, Session, Store};
use crate::error::{BlotterError, SessionError};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::info;

/// How long a freshly issued session stays valid.
pub const SESSION_TTL_HOURS: i64 = 24;

/// On-disk format of a session expiry (UTC).
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// token -> expiry, backed by the `sessions` bucket.
#[derive(Clone)]
pub struct SessionStore {
    store: Store,
}

impl SessionStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn issue(&self) -> Result<Session, BlotterError> {
        self.issue_at(Utc::now()).await
    }

    /// Persist a new random token expiring [`SESSION_TTL_HOURS`] after `now`.
    pub async fn issue_at(&self, now: DateTime<Utc>) -> Result<Session, BlotterError> {
        let token = generate_token();
        let expires_at = now + TimeDelta::hours(SESSION_TTL_HOURS);

        let mut tx = self.store.update().await?;
        tx.put(
            SESSIONS,
            token.as_bytes(),
            format_expiry(expires_at).as_bytes(),
        )
        .await?;
        tx.commit().await?;

        info!(expires_at = %expires_at, "session issued");
        Ok(Session { token, expires_at })
    }

    pub async fn validate(&self, token: &str) -> Result<(), BlotterError> {
        self.validate_at(token, Utc::now()).await
    }

    /// Check `token` against the stored expiry. Never refreshes or removes the record.
    pub async fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), BlotterError> {
        let mut tx = self.store.view().await?;
        let stored = tx.get(SESSIONS, token.as_bytes()).await?;
        tx.rollback().await?;

        let stored = stored.ok_or(SessionError::Missing)?;
        let expires_at = parse_expiry(&stored).ok_or(SessionError::Malformed)?;
        if expires_at <= now {
            return Err(SessionError::Expired.into());
        }
        Ok(())
    }
}

pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.format(EXPIRY_FORMAT).to_string()
}

pub fn parse_expiry(raw: &[u8]) -> Option<DateTime<Utc>> {
    let s = std::str::from_utf8(raw).ok()?;
    NaiveDateTime::parse_from_str(s, EXPIRY_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// 128 bits from the OS RNG, hex encoded.
fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expiry_round_trips_at_second_precision() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 3).unwrap();
        assert_eq!(format_expiry(at), "2026-10-19 08:05:03");
        assert_eq!(parse_expiry(b"2026-10-19 08:05:03"), Some(at));
    }

    #[test]
    fn parse_expiry_rejects_garbage() {
        assert_eq!(parse_expiry(b"tomorrow-ish"), None);
        assert_eq!(parse_expiry(&[0xff, 0xfe]), None);
    }

    #[test]
    fn tokens_are_32_hex_chars() {
        let token = generate_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
