//! Teacher DTOs.

use schoolapp_core::TeacherId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TeacherInsertDto {
    #[validate(length(min = 2, max = 255, message = "Firstname must be 2-255 characters"))]
    pub firstname: String,

    #[validate(length(min = 2, max = 255, message = "Lastname must be 2-255 characters"))]
    pub lastname: String,

    #[validate(length(min = 9, max = 255, message = "VAT must be 9-255 characters"))]
    pub vat: String,
}

impl TeacherInsertDto {
    #[must_use]
    pub fn new(
        vat: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            vat: vat.into(),
        }
    }
}

/// Request to update an existing teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TeacherUpdateDto {
    pub id: TeacherId,

    #[validate(length(min = 2, max = 255, message = "Firstname must be 2-255 characters"))]
    pub firstname: String,

    #[validate(length(min = 2, max = 255, message = "Lastname must be 2-255 characters"))]
    pub lastname: String,

    #[validate(length(min = 9, max = 255, message = "VAT must be 9-255 characters"))]
    pub vat: String,
}

impl TeacherUpdateDto {
    #[must_use]
    pub fn new(
        id: TeacherId,
        vat: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            id,
            firstname: firstname.into(),
            lastname: lastname.into(),
            vat: vat.into(),
        }
    }
}

/// Teacher response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherReadOnlyDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TeacherId>,
    pub firstname: String,
    pub lastname: String,
    pub vat: String,
}

/// Optional filters for teacher searches.
///
/// Each present, non-empty field becomes a prefix filter on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeacherFiltersDto {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub vat: Option<String>,
}

impl TeacherFiltersDto {
    #[must_use]
    pub fn with_firstname(mut self, firstname: impl Into<String>) -> Self {
        self.firstname = Some(firstname.into());
        self
    }

    #[must_use]
    pub fn with_lastname(mut self, lastname: impl Into<String>) -> Self {
        self.lastname = Some(lastname.into());
        self
    }

    #[must_use]
    pub fn with_vat(mut self, vat: impl Into<String>) -> Self {
        self.vat = Some(vat.into());
        self
    }
}
