mod common;

use blotter::db::USERS;
use blotter::service::{CredentialStore, ProvisionOutcome};
use blotter::{AuthError, BlotterError};
use common::TempStore;

#[tokio::test]
async fn provisioned_password_verifies() {
    let db = TempStore::new("creds-verify").await;
    let creds = CredentialStore::new(db.store.clone());

    creds.provision("editor", "hunter2").await.expect("provision");

    creds.verify("editor", "hunter2").await.expect("correct password");
    assert!(matches!(
        creds.verify("editor", "hunter3").await,
        Err(BlotterError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        creds.verify("editor", "").await,
        Err(BlotterError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn unknown_user_fails_closed() {
    let db = TempStore::new("creds-unknown").await;
    let creds = CredentialStore::new(db.store.clone());

    assert!(matches!(
        creds.verify("nobody", "").await,
        Err(BlotterError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        creds.verify("nobody", "anything").await,
        Err(BlotterError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn corrupt_hash_fails_closed() {
    let db = TempStore::new("creds-corrupt").await;
    let creds = CredentialStore::new(db.store.clone());

    let mut tx = db.store.update().await.unwrap();
    tx.put(USERS, b"editor", b"").await.unwrap();
    tx.commit().await.unwrap();

    assert!(matches!(
        creds.verify("editor", "").await,
        Err(BlotterError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn provisioning_overwrites_previous_password() {
    let db = TempStore::new("creds-overwrite").await;
    let creds = CredentialStore::new(db.store.clone());

    creds.provision("editor", "first").await.unwrap();
    creds.provision("editor", "second").await.unwrap();

    assert!(creds.verify("editor", "first").await.is_err());
    creds.verify("editor", "second").await.expect("new password");
}

#[tokio::test]
async fn stored_hash_is_salted() {
    let db = TempStore::new("creds-salted").await;
    let creds = CredentialStore::new(db.store.clone());

    creds.provision("a", "same").await.unwrap();
    creds.provision("b", "same").await.unwrap();

    let a = creds.lookup("a").await.unwrap().expect("user a");
    let b = creds.lookup("b").await.unwrap().expect("user b");
    assert_ne!(a.password_hash, b.password_hash);
    assert!(!a.password_hash.windows(4).any(|w| w == b"same"));
}

#[tokio::test]
async fn provision_from_skips_when_values_missing() {
    let db = TempStore::new("creds-skip").await;
    let creds = CredentialStore::new(db.store.clone());

    assert!(matches!(
        creds.provision_from(None, Some("pw")).await,
        ProvisionOutcome::Skipped
    ));
    assert!(matches!(
        creds.provision_from(Some("editor"), None).await,
        ProvisionOutcome::Skipped
    ));
    assert!(matches!(
        creds.provision_from(Some(""), Some("pw")).await,
        ProvisionOutcome::Skipped
    ));
    assert!(creds.lookup("editor").await.unwrap().is_none());

    match creds.provision_from(Some("editor"), Some("pw")).await {
        ProvisionOutcome::Provisioned { username } => assert_eq!(username, "editor"),
        other => panic!("expected Provisioned, got {other:?}"),
    }
    creds.verify("editor", "pw").await.expect("provisioned user");
}
