//! Typed ID wrappers for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A strongly-typed wrapper for teacher IDs.
///
/// Teacher identities are assigned by the database (an autoincrement rowid)
/// unless the caller supplies one on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(pub i64);

impl TeacherId {
    /// Creates a teacher ID from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Parses a teacher ID from a string.
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self(s.trim().parse()?))
    }

    /// Returns the inner value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TeacherId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TeacherId> for i64 {
    fn from(id: TeacherId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_id_parsing() {
        let id = TeacherId::parse(" 42 ").unwrap();
        assert_eq!(id, TeacherId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!(TeacherId::parse("abc").is_err());
    }

    #[test]
    fn test_teacher_id_conversions() {
        let id = TeacherId::from(7);
        let raw: i64 = id.into();
        assert_eq!(raw, 7);
        assert_eq!(id.into_inner(), 7);
    }

    #[test]
    fn test_teacher_id_serializes_transparently() {
        let json = serde_json::to_string(&TeacherId::new(9)).unwrap();
        assert_eq!(json, "9");
    }
}
