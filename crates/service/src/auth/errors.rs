use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already exists")]
    DuplicateEmail,
    // One message for unknown email and wrong password; the distinction
    // must not leak to callers.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidSession,
    #[error("User not found")]
    NotFound,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::DuplicateEmail => 1001,
            AuthError::InvalidCredentials => 1002,
            AuthError::InvalidSession => 1003,
            AuthError::NotFound => 1004,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}
