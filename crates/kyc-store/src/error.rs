//! Error types for repositories, sessions and authentication

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    #[error("repository lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("audit log failed verification: {0}")]
    AuditIntegrity(#[from] shared_types::AuditError),

    #[error("session lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid signup: {0}")]
    InvalidSignup(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Error)]
pub enum InviteError {
    #[error("Invalid invitation: {0}")]
    Invalid(String),

    #[error("Unknown form template: {0}")]
    UnknownFormTemplate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
