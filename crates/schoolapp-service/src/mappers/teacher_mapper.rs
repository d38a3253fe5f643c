//! Pure conversions between teachers, their DTOs and criteria maps.

use crate::dto::{TeacherFiltersDto, TeacherInsertDto, TeacherReadOnlyDto, TeacherUpdateDto};
use schoolapp_core::Teacher;
use schoolapp_repository::Criteria;

/// Builds a new, not yet persisted teacher.
#[must_use]
pub fn map_to_teacher(dto: TeacherInsertDto) -> Teacher {
    Teacher {
        id: None,
        vat: dto.vat,
        firstname: dto.firstname,
        lastname: dto.lastname,
    }
}

/// Builds a teacher carrying the DTO's identity.
#[must_use]
pub fn map_update_to_teacher(dto: TeacherUpdateDto) -> Teacher {
    Teacher {
        id: Some(dto.id),
        vat: dto.vat,
        firstname: dto.firstname,
        lastname: dto.lastname,
    }
}

#[must_use]
pub fn map_to_read_only_dto(teacher: Teacher) -> TeacherReadOnlyDto {
    TeacherReadOnlyDto {
        id: teacher.id,
        firstname: teacher.firstname,
        lastname: teacher.lastname,
        vat: teacher.vat,
    }
}

#[must_use]
pub fn teachers_to_read_only_dtos(teachers: Vec<Teacher>) -> Vec<TeacherReadOnlyDto> {
    teachers.into_iter().map(map_to_read_only_dto).collect()
}

/// Converts filters into criteria. Absent and empty fields are left out.
#[must_use]
pub fn map_to_criteria(filters: &TeacherFiltersDto) -> Criteria {
    [
        ("firstname", &filters.firstname),
        ("lastname", &filters.lastname),
        ("vat", &filters.vat),
    ]
    .into_iter()
    .filter_map(|(path, value)| {
        value
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(|v| (path, v))
    })
    .collect()
}

impl From<TeacherInsertDto> for Teacher {
    fn from(dto: TeacherInsertDto) -> Self {
        map_to_teacher(dto)
    }
}

impl From<TeacherUpdateDto> for Teacher {
    fn from(dto: TeacherUpdateDto) -> Self {
        map_update_to_teacher(dto)
    }
}

impl From<Teacher> for TeacherReadOnlyDto {
    fn from(teacher: Teacher) -> Self {
        map_to_read_only_dto(teacher)
    }
}

impl From<&TeacherFiltersDto> for Criteria {
    fn from(filters: &TeacherFiltersDto) -> Self {
        map_to_criteria(filters)
    }
}
