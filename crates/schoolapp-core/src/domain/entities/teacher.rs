//! Teacher entity.

use crate::{Entity, TeacherId};
use serde::{Deserialize, Serialize};

/// Teacher entity.
///
/// `id` is `None` until the teacher has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique identifier, assigned on insert.
    pub id: Option<TeacherId>,

    /// Tax identification number (unique).
    pub vat: String,

    /// First name.
    pub firstname: String,

    /// Last name.
    pub lastname: String,
}

impl Teacher {
    /// Creates a new, not yet persisted teacher.
    #[must_use]
    pub fn new(
        vat: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            vat: vat.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

impl Entity for Teacher {
    type Id = TeacherId;

    fn id(&self) -> Option<TeacherId> {
        self.id
    }

    fn with_id(mut self, id: TeacherId) -> Self {
        self.id = Some(id);
        self
    }
}
