//! Unified error types for all layers of the application.

use thiserror::Error;

/// Unified error type for all layers of SchoolApp.
///
/// Caller mistakes (`NotFound`, `InvalidPath`, `Validation`, `Conflict`) are
/// kept apart from infrastructure failures (`Persistence`, `Configuration`,
/// `Internal`). Nothing in this workspace retries on any of them.
#[derive(Error, Debug)]
pub enum SchoolError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// A criteria key or field name does not resolve on the entity
    #[error("Invalid field path '{path}' for entity {entity}")]
    InvalidPath { entity: &'static str, path: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate VAT)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Constraint violation, connectivity or driver failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SchoolError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidPath { .. } => "INVALID_PATH",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error was caused by the caller's input rather
    /// than by the infrastructure.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::InvalidPath { .. }
                | Self::Validation(_)
                | Self::Conflict(_)
        )
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an invalid path error.
    #[must_use]
    pub fn invalid_path<T: Into<String>>(entity: &'static str, path: T) -> Self {
        Self::InvalidPath {
            entity,
            path: path.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a persistence error.
    #[must_use]
    pub fn persistence<T: Into<String>>(message: T) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for SchoolError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation
                | sqlx::error::ErrorKind::ForeignKeyViolation
                | sqlx::error::ErrorKind::NotNullViolation
                | sqlx::error::ErrorKind::CheckViolation => {
                    Self::Persistence(format!("constraint violation: {}", db_err.message()))
                }
                _ => Self::Persistence(err.to_string()),
            },
            _ => Self::Persistence(err.to_string()),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::migrate::MigrateError> for SchoolError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Persistence(format!("Migration failed: {}", err))
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}
