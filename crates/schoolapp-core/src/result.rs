//! Result type aliases for SchoolApp.

use crate::SchoolError;

/// A specialized `Result` type for SchoolApp operations.
pub type SchoolResult<T> = Result<T, SchoolError>;
