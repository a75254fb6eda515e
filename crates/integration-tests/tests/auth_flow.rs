//! Integration tests for the mocked authentication flow.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use clementine_storefront::services::auth::{
    AuthError, AuthService, Credentials, Registration,
};
use clementine_storefront::storage::JsonFileStore;

fn auth_at(dir: &std::path::Path) -> AuthService {
    let store = JsonFileStore::open(dir).unwrap();
    AuthService::new(Box::new(store), Duration::ZERO)
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn test_login_then_restore_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut auth = auth_at(dir.path());
        assert!(!auth.is_logged_in());
        let outcome = auth
            .login(credentials("jane@example.com", "hunter22"))
            .await
            .unwrap();
        assert!(outcome.token.starts_with("mock-token-"));
    }

    let restored = auth_at(dir.path());
    assert!(restored.is_logged_in());
    let user = restored.current_user().unwrap();
    assert_eq!(user.email.as_ref(), "jane@example.com");
    assert_eq!(user.name, "jane");
    assert!(restored.token().is_some());
}

#[tokio::test]
async fn test_logout_clears_disk_session() {
    let dir = tempfile::tempdir().unwrap();

    let mut auth = auth_at(dir.path());
    auth.login(credentials("jane@example.com", "hunter22"))
        .await
        .unwrap();
    auth.logout();

    let restored = auth_at(dir.path());
    assert!(!restored.is_logged_in());
    assert!(restored.token().is_none());
}

#[tokio::test]
async fn test_register_flow_signs_in() {
    let dir = tempfile::tempdir().unwrap();

    let mut auth = auth_at(dir.path());
    let outcome = auth
        .register(Registration {
            name: String::from("Jane Doe"),
            email: String::from("jane@example.com"),
            password: String::from("hunter22"),
            confirm_password: String::from("hunter22"),
        })
        .await
        .unwrap();

    assert_eq!(outcome.user.name, "Jane Doe");
    assert!(auth.is_logged_in());
}

#[tokio::test]
async fn test_failed_login_leaves_no_session() {
    let dir = tempfile::tempdir().unwrap();

    let mut auth = auth_at(dir.path());
    let err = auth
        .login(credentials("jane@example.com", "nope"))
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::PasswordTooShort { min: 6 });

    let restored = auth_at(dir.path());
    assert!(!restored.is_logged_in());
}
