//! Mocked authentication.
//!
//! Sign-in and registration succeed for any well-formed input after a
//! configurable simulated delay; no credentials are ever verified against
//! a backend. The signed-in user and a bearer token are persisted so a
//! session survives reconstruction.

mod error;

pub use error::AuthError;

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use clementine_core::{Email, UserId};

use crate::models::User;
use crate::observe::{ObserverSet, SubscriptionId};
use crate::storage::{self, KeyValueStore, keys};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Sign-in input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration input.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Result of a successful sign-in or registration.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    pub token: String,
}

/// Session state holder. Restores any persisted session at construction
/// and notifies observers whenever the signed-in user changes.
pub struct AuthService {
    store: Box<dyn KeyValueStore>,
    current: Option<User>,
    token: Option<String>,
    latency: Duration,
    observers: ObserverSet<Option<User>>,
}

impl AuthService {
    /// Restore a session from `store`. A session is only restored when
    /// both the user record and the token are present; a partial session
    /// is treated as signed out.
    #[must_use]
    pub fn new(store: Box<dyn KeyValueStore>, latency: Duration) -> Self {
        let user: Option<User> = storage::load_json(store.as_ref(), keys::CURRENT_USER);
        let token = match store.get(keys::AUTH_TOKEN) {
            Ok(token) => token,
            Err(err) => {
                warn!(key = keys::AUTH_TOKEN, %err, "failed to read stored token");
                None
            }
        };

        let (current, token) = match (user, token) {
            (Some(user), Some(token)) => {
                debug!(user = %user.email, "restored session");
                (Some(user), Some(token))
            }
            _ => (None, None),
        };

        Self {
            store,
            current,
            token,
            latency,
            observers: ObserverSet::new(),
        }
    }

    /// Sign in with an email and password.
    ///
    /// Validation is local only; any syntactically valid credentials are
    /// accepted after the simulated latency elapses.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the email is malformed or the password
    /// is shorter than [`MIN_PASSWORD_LENGTH`].
    pub async fn login(&mut self, credentials: Credentials) -> Result<AuthOutcome, AuthError> {
        tokio::time::sleep(self.latency).await;

        let email = Email::parse(&credentials.email)?;
        if credentials.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        let name = email.local_part().to_owned();
        Ok(self.establish_session(email, name))
    }

    /// Register a new account and sign in as it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the name is blank, the email is
    /// malformed, the password is too short, or the confirmation does not
    /// match.
    pub async fn register(&mut self, registration: Registration) -> Result<AuthOutcome, AuthError> {
        tokio::time::sleep(self.latency).await;

        let name = registration.name.trim();
        if name.is_empty() {
            return Err(AuthError::NameRequired);
        }
        let email = Email::parse(&registration.email)?;
        if registration.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if registration.password != registration.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        Ok(self.establish_session(email, name.to_owned()))
    }

    /// Sign out, clearing the persisted session.
    pub fn logout(&mut self) {
        self.current = None;
        self.token = None;
        for key in [keys::CURRENT_USER, keys::AUTH_TOKEN] {
            if let Err(err) = self.store.remove(key) {
                warn!(key, %err, "failed to clear stored session");
            }
        }
        self.observers.notify(&None);
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// The active bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Register an observer of the signed-in user. The observer is called
    /// immediately with the current state, then on every change.
    pub fn subscribe(
        &mut self,
        mut observer: impl FnMut(&Option<User>) + Send + 'static,
    ) -> SubscriptionId {
        observer(&self.current);
        self.observers.subscribe(observer)
    }

    /// Drop a previously registered observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn establish_session(&mut self, email: Email, name: String) -> AuthOutcome {
        let user = User {
            id: UserId::new(1),
            email,
            name,
            created_at: Utc::now(),
        };
        let token = format!("mock-token-{}", Utc::now().timestamp_millis());

        storage::persist_json(self.store.as_mut(), keys::CURRENT_USER, &user);
        if let Err(err) = self.store.set(keys::AUTH_TOKEN, &token) {
            warn!(key = keys::AUTH_TOKEN, %err, "failed to persist token");
        }

        self.current = Some(user.clone());
        self.token = Some(token.clone());
        self.observers.notify(&self.current);

        AuthOutcome { user, token }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("current", &self.current)
            .field("latency", &self.latency)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use clementine_core::EmailError;

    use crate::storage::MemoryStore;

    use super::*;

    fn service() -> AuthService {
        AuthService::new(Box::new(MemoryStore::new()), Duration::ZERO)
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_login_accepts_valid_credentials() {
        let mut auth = service();
        let outcome = auth
            .login(credentials("jane.doe@example.com", "hunter22"))
            .await
            .unwrap();

        assert_eq!(outcome.user.name, "jane.doe");
        assert!(outcome.token.starts_with("mock-token-"));
        assert!(auth.is_logged_in());
        assert_eq!(auth.token(), Some(outcome.token.as_str()));
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email() {
        let mut auth = service();
        let err = auth
            .login(credentials("not-an-email", "hunter22"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidEmail(EmailError::BadAtSymbol));
        assert!(!auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_rejects_short_password() {
        let mut auth = service();
        let err = auth
            .login(credentials("jane@example.com", "short"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::PasswordTooShort { min: 6 });
    }

    #[tokio::test]
    async fn test_register_requires_matching_confirmation() {
        let mut auth = service();
        let err = auth
            .register(Registration {
                name: String::from("Jane Doe"),
                email: String::from("jane@example.com"),
                password: String::from("hunter22"),
                confirm_password: String::from("hunter23"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);
    }

    #[tokio::test]
    async fn test_register_requires_nonblank_name() {
        let mut auth = service();
        let err = auth
            .register(Registration {
                name: String::from("   "),
                email: String::from("jane@example.com"),
                password: String::from("hunter22"),
                confirm_password: String::from("hunter22"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::NameRequired);
    }

    #[tokio::test]
    async fn test_register_uses_given_name() {
        let mut auth = service();
        let outcome = auth
            .register(Registration {
                name: String::from("  Jane Doe "),
                email: String::from("jane@example.com"),
                password: String::from("hunter22"),
                confirm_password: String::from("hunter22"),
            })
            .await
            .unwrap();
        assert_eq!(outcome.user.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_session_survives_reconstruction() {
        let mut auth = service();
        auth.login(credentials("jane@example.com", "hunter22"))
            .await
            .unwrap();

        let store = std::mem::replace(&mut auth.store, Box::new(MemoryStore::new()));
        let restored = AuthService::new(store, Duration::ZERO);
        assert!(restored.is_logged_in());
        assert_eq!(
            restored.current_user().unwrap().email.as_ref(),
            "jane@example.com"
        );
    }

    #[tokio::test]
    async fn test_partial_session_is_discarded() {
        let mut auth = service();
        auth.login(credentials("jane@example.com", "hunter22"))
            .await
            .unwrap();
        auth.store.remove(keys::AUTH_TOKEN).unwrap();

        let store = std::mem::replace(&mut auth.store, Box::new(MemoryStore::new()));
        let restored = AuthService::new(store, Duration::ZERO);
        assert!(!restored.is_logged_in());
        assert!(restored.token().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_store_and_notifies() {
        let mut auth = service();
        auth.login(credentials("jane@example.com", "hunter22"))
            .await
            .unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        auth.subscribe(move |user| {
            sink.lock().unwrap().push(user.is_some());
        });

        auth.logout();
        assert!(!auth.is_logged_in());
        assert!(auth.store.get(keys::CURRENT_USER).unwrap().is_none());
        // Replay on subscribe (signed in), then the logout notification.
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }
}
