use async_graphql::{Error, ErrorExtensions};
use tracing::error;

use crate::errors::{CoreError, CoreErrorKind};

/// Convert a core error into a GraphQL error with a `code` extension.
///
/// NotFound errors also carry `entity` and `id`. Internal errors are logged
/// with their source and reported without it.
pub fn core_error_to_graphql_error(err: CoreError) -> Error {
    if err.kind() == CoreErrorKind::Internal {
        match std::error::Error::source(&err) {
            Some(source) => error!(error = %err, source = %source, "Internal error"),
            None => error!(error = %err, "Internal error"),
        }
    }

    let code = err.kind().code();
    let fields = err.fields().cloned();

    Error::new(err.message()).extend_with(|_, e| {
        e.set("code", code);
        if let Some(fields) = &fields {
            for (key, value) in fields {
                e.set(key.as_str(), value.as_str());
            }
        }
    })
}

/// Structured error for argument problems detected at the GraphQL edge.
pub fn validation_error(field: &str, message: impl Into<String>) -> Error {
    Error::new(format!(
        "Validation failed for '{}': {}",
        field,
        message.into()
    ))
    .extend_with(|_, e| {
        e.set("code", CoreErrorKind::Validation.code());
        e.set("field", field);
    })
}
