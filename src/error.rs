use thiserror::Error;

/// Failures of the save / list / delete workflows.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("sign in required")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("a save is already in progress")]
    SaveInProgress,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl GatewayError {
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Unauthenticated => "You need to be signed in to do that".into(),
            GatewayError::Validation(msg) => msg.clone(),
            GatewayError::SaveInProgress => "Still saving the previous palette".into(),
            GatewayError::Storage(e) => e.user_message(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("create failed: {0}")]
    Create(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("delete failed: {0}")]
    Delete(String),

    #[error("decode failed: {0}")]
    Decode(String),
}

impl StorageError {
    pub fn user_message(&self) -> String {
        match self {
            StorageError::Create(_) => "Could not save palette".into(),
            StorageError::Query(_) | StorageError::Decode(_) => "Could not load palettes".into(),
            StorageError::Delete(_) => "Could not delete palette".into(),
        }
    }
}

/// Identity provider failures, classified the way the sign-in form reports them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("user not found")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("email already in use")]
    EmailInUse,

    #[error("weak password")]
    WeakPassword,

    #[error("invalid email")]
    InvalidEmail,

    #[error("too many requests")]
    TooManyRequests,

    #[error("auth error: {0}")]
    Unknown(String),
}

impl AuthError {
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(msg) => msg.clone(),
            AuthError::UserNotFound => "User not found".into(),
            AuthError::WrongPassword => "Wrong password".into(),
            AuthError::EmailInUse => "Email is already in use".into(),
            AuthError::WeakPassword => "Password is too weak".into(),
            AuthError::InvalidEmail => "Invalid email".into(),
            AuthError::TooManyRequests => "Too many attempts. Try again later".into(),
            AuthError::Unknown(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard capability at all; callers fall back to showing the text.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

impl ClipboardError {
    pub fn user_message(&self) -> String {
        match self {
            ClipboardError::Unavailable(_) => "Clipboard is not available".into(),
            ClipboardError::Write(_) => "Could not copy to clipboard".into(),
        }
    }
}
