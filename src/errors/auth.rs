//! Errors raised while resolving the caller's identity from a session token.
//!
//! These never reach API callers directly: an unresolvable token simply means
//! the request runs without an actor, and the operation's role check reports
//! `Unauthenticated`. They are logged at the HTTP edge.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Header present but not a bearer token
    #[error("Malformed authorization header")]
    MalformedHeader,

    /// No session row for the token
    #[error("Session not found")]
    SessionNotFound,

    /// Session row exists but is past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Session points at a user that no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Stored role text is not a known role
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AuthError {
    /// Errors that mean "anonymous request" rather than a server fault.
    pub fn is_anonymous(&self) -> bool {
        matches!(
            self,
            AuthError::MalformedHeader
                | AuthError::SessionNotFound
                | AuthError::SessionExpired
                | AuthError::UserNotFound
        )
    }
}
