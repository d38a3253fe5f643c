//! Core domain traits.

use std::fmt::{Debug, Display};

/// Trait for entities with a unique identifier.
///
/// The identifier is optional until the entity has been persisted; once
/// assigned it never changes. Identities are integer row keys, so every
/// identity type converts to and from `i64`.
pub trait Entity {
    /// The identity type.
    type Id: Copy + Eq + Debug + Display + Into<i64> + From<i64> + Send + Sync + 'static;

    /// Returns the entity's identifier, or `None` if it is unassigned.
    fn id(&self) -> Option<Self::Id>;

    /// Returns a copy of the entity carrying the given identifier.
    #[must_use]
    fn with_id(self, id: Self::Id) -> Self;

    /// Returns true if the entity has not been assigned an identifier yet.
    fn is_transient(&self) -> bool {
        self.id().is_none()
    }
}
