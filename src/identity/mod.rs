//! Who is signed in.
//!
//! `AuthContext` is the single owner of the current user. Components that
//! care about identity hold a clone of it (or a `watch::Receiver` from
//! `subscribe`) instead of reading global state.

pub mod local;

use crate::error::AuthError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

pub use local::LocalAccounts;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn display_name(&self) -> &str {
        &self.email
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Resume a session left over from a previous run, if any.
    async fn restore(&self) -> Result<Option<User>, AuthError>;
}

#[derive(Clone)]
pub struct AuthContext {
    provider: Arc<dyn IdentityProvider>,
    current: Arc<watch::Sender<Option<User>>>,
}

impl AuthContext {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            provider,
            current: Arc::new(tx),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    /// Receiver that is notified on every login and logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    pub async fn restore(&self) -> Result<Option<User>, AuthError> {
        let user = self.provider.restore().await?;
        if user.is_some() {
            self.publish(user.clone());
        }
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate_credentials(email, password)?;
        let user = self.provider.sign_in(email.trim(), password).await?;
        tracing::info!(user = %user.id, "signed in");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate_credentials(email, password)?;
        let user = self.provider.sign_up(email.trim(), password).await?;
        tracing::info!(user = %user.id, "account created");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        tracing::info!("signed out");
        self.publish(None);
        Ok(())
    }

    fn publish(&self, user: Option<User>) {
        self.current.send_replace(user);
    }
}

/// Form-level checks done before the provider is involved.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::Validation("Fill in all fields".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<User, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if email == "missing@example.com" {
                return Err(AuthError::UserNotFound);
            }
            Ok(User {
                id: "u1".into(),
                email: email.into(),
            })
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
            self.sign_in(email, password).await
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn restore(&self) -> Result<Option<User>, AuthError> {
            Ok(None)
        }
    }

    #[test]
    fn test_validate_credentials() {
        assert!(matches!(
            validate_credentials("", "secret1"),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_credentials("a@b.co", ""),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            validate_credentials("a@b.co", "12345"),
            Err(AuthError::Validation(_))
        ));
        assert!(validate_credentials("a@b.co", "123456").is_ok());
    }

    #[tokio::test]
    async fn test_validation_skips_provider() {
        let provider = Arc::new(FakeProvider::default());
        let auth = AuthContext::new(provider.clone());
        assert!(auth.sign_in("a@b.co", "123").await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_login_and_logout() {
        let auth = AuthContext::new(Arc::new(FakeProvider::default()));
        let mut rx = auth.subscribe();

        auth.sign_in("ana@example.com", "secret1").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|u| u.id.as_str()), Some("u1"));
        assert_eq!(auth.current_user().unwrap().display_name(), "ana@example.com");

        auth.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn test_provider_error_keeps_user_signed_out() {
        let auth = AuthContext::new(Arc::new(FakeProvider::default()));
        let err = auth.sign_in("missing@example.com", "secret1").await.unwrap_err();
        assert_eq!(err, AuthError::UserNotFound);
        assert!(auth.current_user().is_none());
    }
}
