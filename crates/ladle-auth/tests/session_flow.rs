//! End-to-end session lifecycle tests over the in-memory store.

use std::sync::Arc;

use ladle_auth::credential::CredentialVerifier;
use ladle_auth::password::{PasswordHasher, PasswordValidator};
use ladle_auth::session::SessionAuthenticator;
use ladle_auth::store::MemoryAccountStore;
use ladle_auth::token::{TokenIssuer, TokenVerifier};
use ladle_core::config::AuthConfig;
use ladle_core::error::ErrorKind;
use ladle_core::traits::AccountStore;

struct TestAuth {
    authenticator: SessionAuthenticator,
    credentials: Arc<CredentialVerifier>,
    store: Arc<MemoryAccountStore>,
}

fn test_auth() -> TestAuth {
    let config = AuthConfig {
        token_secret: "test-secret".to_string(),
        ..AuthConfig::default()
    };

    let store = Arc::new(MemoryAccountStore::new());
    let store_dyn: Arc<dyn AccountStore> = store.clone();

    let credentials = Arc::new(CredentialVerifier::new(
        store_dyn.clone(),
        PasswordHasher::new(),
        PasswordValidator::new(&config),
    ));

    let authenticator = SessionAuthenticator::new(
        Arc::new(TokenIssuer::new(&config).unwrap()),
        Arc::new(TokenVerifier::new(&config).unwrap()),
        credentials.clone(),
        store_dyn,
    );

    TestAuth {
        authenticator,
        credentials,
        store,
    }
}

impl TestAuth {
    async fn token_count(&self, account_id: uuid::Uuid) -> usize {
        self.store
            .find_by_id(account_id)
            .await
            .unwrap()
            .unwrap()
            .refresh_tokens
            .len()
    }
}

#[tokio::test]
async fn register_then_duplicate_fails() {
    let auth = test_auth();

    let account = auth
        .credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();
    assert_eq!(account.email, "a@x.com");

    let err = auth
        .credentials
        .register("a@x.com", "password2", "B")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Duplicate);
}

#[tokio::test]
async fn password_length_floor() {
    let auth = test_auth();

    let err = auth
        .credentials
        .register("short@x.com", "1234567", "S")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // Exactly the minimum length succeeds.
    auth.credentials
        .register("short@x.com", "12345678", "S")
        .await
        .unwrap();
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let wrong_password = auth
        .authenticator
        .login("a@x.com", "password2")
        .await
        .unwrap_err();
    let unknown_email = auth
        .authenticator
        .login("nobody@x.com", "password1")
        .await
        .unwrap_err();

    assert_eq!(wrong_password.kind, ErrorKind::Authentication);
    assert_eq!(unknown_email.kind, ErrorKind::Authentication);
    assert_eq!(wrong_password.message, unknown_email.message);
}

#[tokio::test]
async fn each_login_adds_a_device_session() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let first = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    assert_eq!(auth.token_count(first.account.id).await, 1);

    let second = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    assert_eq!(auth.token_count(second.account.id).await, 2);
    assert_ne!(first.tokens.refresh_token, second.tokens.refresh_token);
}

#[tokio::test]
async fn refresh_rotates_and_keeps_other_sessions() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let first = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    let second = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    let account_id = first.account.id;

    let new_pair = auth
        .authenticator
        .refresh(Some(&first.tokens.refresh_token))
        .await
        .unwrap();

    // One replaced, one untouched.
    assert_eq!(auth.token_count(account_id).await, 2);

    let tokens = auth
        .store
        .find_by_id(account_id)
        .await
        .unwrap()
        .unwrap()
        .refresh_tokens;
    assert!(!tokens.contains(&first.tokens.refresh_token));
    assert!(tokens.contains(&second.tokens.refresh_token));
    assert!(tokens.contains(&new_pair.refresh_token));
}

#[tokio::test]
async fn replaying_a_rotated_token_revokes_everything() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let first = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    let second = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    let account_id = first.account.id;

    auth.authenticator
        .refresh(Some(&first.tokens.refresh_token))
        .await
        .unwrap();

    // Replay of the rotated-out token: reuse detected, store cleared.
    let err = auth
        .authenticator
        .refresh(Some(&first.tokens.refresh_token))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::TokenReuse);
    assert_eq!(auth.token_count(account_id).await, 0);

    // The untouched second-device token is collateral: full re-login.
    let err = auth
        .authenticator
        .refresh(Some(&second.tokens.refresh_token))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn concurrent_refresh_of_one_token_succeeds_at_most_once() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let login = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    let token = login.tokens.refresh_token.clone();

    let (a, b) = tokio::join!(
        auth.authenticator.refresh(Some(&token)),
        auth.authenticator.refresh(Some(&token)),
    );

    assert_eq!(
        a.is_ok() as u32 + b.is_ok() as u32,
        1,
        "exactly one concurrent rotation may win"
    );
}

#[tokio::test]
async fn refresh_without_a_token_is_missing() {
    let auth = test_auth();
    let err = auth.authenticator.refresh(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingToken);
}

#[tokio::test]
async fn logout_revokes_the_presented_token() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let login = auth.authenticator.login("a@x.com", "password1").await.unwrap();
    let account_id = login.account.id;

    auth.authenticator
        .logout(Some(&login.tokens.refresh_token))
        .await
        .unwrap();
    assert_eq!(auth.token_count(account_id).await, 0);

    // The logged-out token can no longer be exchanged.
    let err = auth
        .authenticator
        .refresh(Some(&login.tokens.refresh_token))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let auth = test_auth();

    auth.authenticator.logout(None).await.unwrap();
    auth.authenticator.logout(Some("garbage")).await.unwrap();
}

#[tokio::test]
async fn verify_access_is_stateless_and_repeatable() {
    let auth = test_auth();
    auth.credentials
        .register("a@x.com", "password1", "A")
        .await
        .unwrap();

    let login = auth.authenticator.login("a@x.com", "password1").await.unwrap();

    let p1 = auth
        .authenticator
        .verify_access(Some(&login.tokens.access_token))
        .unwrap();
    let p2 = auth
        .authenticator
        .verify_access(Some(&login.tokens.access_token))
        .unwrap();

    assert_eq!(p1.account_id, login.account.id);
    assert_eq!(p1, p2);

    // A refresh token is not acceptable as an access token.
    let err = auth
        .authenticator
        .verify_access(Some(&login.tokens.refresh_token))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidToken);
}

#[tokio::test]
async fn oauth_first_login_creates_account_once() {
    let auth = test_auth();

    let first = auth
        .authenticator
        .login_oauth("google-123", "o@x.com", "O")
        .await
        .unwrap();
    let second = auth
        .authenticator
        .login_oauth("google-123", "o@x.com", "O")
        .await
        .unwrap();

    assert_eq!(first.account.id, second.account.id);
    assert!(first.account.password_hash.is_none());
    assert_eq!(auth.token_count(first.account.id).await, 2);
}

#[tokio::test]
async fn oauth_account_cannot_password_login() {
    let auth = test_auth();

    auth.authenticator
        .login_oauth("google-123", "o@x.com", "O")
        .await
        .unwrap();

    let err = auth
        .authenticator
        .login("o@x.com", "password1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
}
