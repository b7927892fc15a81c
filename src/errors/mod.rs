//! Error types shared across the crate.
//!
//! - **CoreError**: what every table/order/area operation returns. Its kind
//!   maps one-to-one onto the `code` extension of GraphQL errors.
//! - **AuthError**: failures while turning a bearer token into an actor.

pub mod auth;
pub mod core_error;

pub use auth::AuthError;
pub use core_error::{CoreError, CoreErrorKind, CoreResult, WriteFailure};

/// Result type alias for identity resolution
pub type AuthResult<T> = Result<T, AuthError>;
