use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use sea_orm::{DbErr, SqlErr};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CoreErrorKind {
    NotFound,
    Validation,
    Conflict,
    Forbidden,
    Unauthenticated,
    Internal,
}

impl CoreErrorKind {
    /// Stable code used in API error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            CoreErrorKind::NotFound => "NOT_FOUND",
            CoreErrorKind::Validation => "VALIDATION_FAILED",
            CoreErrorKind::Conflict => "CONFLICT",
            CoreErrorKind::Forbidden => "FORBIDDEN",
            CoreErrorKind::Unauthenticated => "UNAUTHENTICATED",
            CoreErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug)]
pub struct CoreError {
    kind: CoreErrorKind,
    message: String,
    fields: Option<BTreeMap<String, String>>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn new(kind: CoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: None,
            source: None,
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        let entity = entity.into();
        let id = id.into();
        let message = format!("{} '{}' not found", entity, id);

        let mut fields = BTreeMap::new();
        fields.insert("entity".to_string(), entity);
        fields.insert("id".to_string(), id);

        Self {
            kind: CoreErrorKind::NotFound,
            message,
            fields: Some(fields),
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Conflict, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Forbidden, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Unauthenticated, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Internal, message)
    }

    /// Wrap a database failure that has no domain meaning of its own.
    pub fn database(operation: &str, err: DbErr) -> Self {
        Self::internal(format!("Database error during {}", operation)).with_source(err)
    }

    pub fn with_fields(mut self, fields: BTreeMap<String, String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> CoreErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fields(&self) -> Option<&BTreeMap<String, String>> {
        self.fields.as_ref()
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl StdError for CoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

/// Constraint violations reported by the database, as seen by a write.
#[derive(Debug)]
pub enum WriteFailure {
    Unique,
    ForeignKey,
    Other(DbErr),
}

impl From<DbErr> for WriteFailure {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => WriteFailure::Unique,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => WriteFailure::ForeignKey,
            _ => WriteFailure::Other(err),
        }
    }
}
