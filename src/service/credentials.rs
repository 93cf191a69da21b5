use crate::db::{Store, USERS, User};
use crate::error::{AuthError, BlotterError};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::RngCore;
use rand::rngs::OsRng;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Hash verified when the username is unknown, so a miss costs the same as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("blotter-dummy-password").ok());

/// Result of the startup provisioning step.
#[derive(Debug)]
pub enum ProvisionOutcome {
    /// Username or password was not configured.
    Skipped,
    Provisioned { username: String },
    Failed(BlotterError),
}

/// username -> password hash, backed by the `users` bucket.
#[derive(Clone)]
pub struct CredentialStore {
    store: Store,
}

impl CredentialStore {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn lookup(&self, username: &str) -> Result<Option<User>, BlotterError> {
        let mut tx = self.store.view().await?;
        let hash = tx.get(USERS, username.as_bytes()).await?;
        tx.rollback().await?;
        Ok(hash.map(|password_hash| User {
            username: username.to_string(),
            password_hash,
        }))
    }

    /// Check `password` against the stored hash for `username`.
    ///
    /// Fails closed: an unknown user or an unreadable hash is rejected exactly
    /// like a wrong password.
    pub async fn verify(&self, username: &str, password: &str) -> Result<(), BlotterError> {
        let user = self.lookup(username).await?;
        let password = password.to_string();
        let matched = tokio::task::spawn_blocking(move || {
            check_password(user.as_ref().map(|u| u.password_hash.as_slice()), &password)
        })
        .await?;

        if matched {
            Ok(())
        } else {
            debug!(username, "credential check failed");
            Err(AuthError::InvalidCredentials.into())
        }
    }

    /// Hash `password` with a fresh salt and store it, replacing any existing record.
    pub async fn provision(&self, username: &str, password: &str) -> Result<(), BlotterError> {
        let password = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let mut tx = self.store.update().await?;
        tx.put(USERS, username.as_bytes(), hash.as_bytes()).await?;
        tx.commit().await?;
        info!(username, "user credentials stored");
        Ok(())
    }

    /// Provision from optional out-of-band values. Missing or empty values skip
    /// provisioning rather than failing.
    pub async fn provision_from(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ProvisionOutcome {
        let (Some(username), Some(password)) = (
            username.filter(|u| !u.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return ProvisionOutcome::Skipped;
        };

        match self.provision(username, password).await {
            Ok(()) => ProvisionOutcome::Provisioned {
                username: username.to_string(),
            },
            Err(e) => ProvisionOutcome::Failed(e),
        }
    }
}

/// PHC-encoded Argon2id hash of `password` with a random 16 byte salt.
pub fn hash_password(password: &str) -> Result<String, BlotterError> {
    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| BlotterError::Hash(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BlotterError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

fn check_password(stored: Option<&[u8]>, password: &str) -> bool {
    let parsed = stored
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .and_then(|s| PasswordHash::new(s).ok());

    match parsed {
        Some(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        None => {
            if let Some(dummy) = DUMMY_HASH.as_deref()
                && let Ok(hash) = PasswordHash::new(dummy)
            {
                let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
            }
            false
        }
    }
}
