//! Accounts kept in the local SQLite database.

use super::{IdentityProvider, User, MIN_PASSWORD_LEN};
use crate::error::AuthError;
use crate::storage::sqlite::AccountRow;
use crate::storage::StorageHandle;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const MAX_FAILED_ATTEMPTS: u32 = 5;
const ATTEMPT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct FailedAttempts {
    count: u32,
    first_at: Instant,
}

pub struct LocalAccounts {
    handle: StorageHandle,
    failures: Mutex<HashMap<String, FailedAttempts>>,
}

impl LocalAccounts {
    pub fn new(handle: StorageHandle) -> Self {
        Self {
            handle,
            failures: Mutex::new(HashMap::new()),
        }
    }

    fn is_throttled(&self, email: &str) -> bool {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        match failures.get(email) {
            Some(f) if f.first_at.elapsed() > ATTEMPT_WINDOW => {
                failures.remove(email);
                false
            }
            Some(f) => f.count >= MAX_FAILED_ATTEMPTS,
            None => false,
        }
    }

    fn record_failure(&self, email: &str) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        let entry = failures.entry(email.to_string()).or_insert(FailedAttempts {
            count: 0,
            first_at: Instant::now(),
        });
        entry.count += 1;
    }

    fn clear_failures(&self, email: &str) {
        let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        failures.remove(email);
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn internal(e: anyhow::Error) -> AuthError {
    AuthError::Unknown(format!("{e:#}"))
}

fn join_error(e: tokio::task::JoinError) -> AuthError {
    AuthError::Unknown(format!("spawn error: {e}"))
}

fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[async_trait]
impl IdentityProvider for LocalAccounts {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if self.is_throttled(&email) {
            tracing::warn!(%email, "sign-in throttled");
            return Err(AuthError::TooManyRequests);
        }

        let handle = self.handle.clone();
        let lookup = email.clone();
        let account = tokio::task::spawn_blocking(move || {
            handle.open()?.find_account_by_email(&lookup)
        })
        .await
        .map_err(join_error)?
        .map_err(internal)?;

        let Some(account) = account else {
            self.record_failure(&email);
            return Err(AuthError::UserNotFound);
        };
        if hash_password(&account.salt, password) != account.password_hash {
            self.record_failure(&email);
            return Err(AuthError::WrongPassword);
        }
        self.clear_failures(&email);

        let handle = self.handle.clone();
        let user_id = account.id.clone();
        tokio::task::spawn_blocking(move || handle.open()?.set_session(&user_id))
            .await
            .map_err(join_error)?
            .map_err(internal)?;

        Ok(User {
            id: account.id,
            email: account.email,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let salt = hex::encode(rand::random::<[u8; 16]>());
        let account = AccountRow {
            id: uuid::Uuid::new_v4().simple().to_string(),
            email: email.clone(),
            password_hash: hash_password(&salt, password),
            salt,
        };

        let handle = self.handle.clone();
        let row = account.clone();
        tokio::task::spawn_blocking(move || -> Result<(), AuthError> {
            let storage = handle.open().map_err(internal)?;
            if storage.find_account_by_email(&row.email).map_err(internal)?.is_some() {
                return Err(AuthError::EmailInUse);
            }
            storage.insert_account(&row, now_unix()).map_err(internal)?;
            storage.set_session(&row.id).map_err(internal)
        })
        .await
        .map_err(join_error)??;

        Ok(User {
            id: account.id,
            email: account.email,
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let handle = self.handle.clone();
        tokio::task::spawn_blocking(move || handle.open()?.clear_session())
            .await
            .map_err(join_error)?
            .map_err(internal)
    }

    async fn restore(&self) -> Result<Option<User>, AuthError> {
        let handle = self.handle.clone();
        let account = tokio::task::spawn_blocking(move || -> anyhow::Result<Option<AccountRow>> {
            let storage = handle.open()?;
            match storage.get_session()? {
                Some(user_id) => storage.find_account_by_id(&user_id),
                None => Ok(None),
            }
        })
        .await
        .map_err(join_error)?
        .map_err(internal)?;

        Ok(account.map(|a| User {
            id: a.id,
            email: a.email,
        }))
    }
}
