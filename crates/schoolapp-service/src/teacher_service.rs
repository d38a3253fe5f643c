//! Teacher service trait definition.

use crate::dto::{TeacherFiltersDto, TeacherInsertDto, TeacherReadOnlyDto, TeacherUpdateDto};
use async_trait::async_trait;
use schoolapp_core::{Interface, Page, SchoolResult, TeacherId};

/// Teacher service trait.
#[async_trait]
pub trait TeacherService: Interface + Send + Sync {
    /// Creates a new teacher. A VAT already in use is a `Conflict`.
    async fn insert_teacher(&self, dto: TeacherInsertDto) -> SchoolResult<TeacherReadOnlyDto>;

    /// Updates an existing teacher.
    async fn update_teacher(&self, dto: TeacherUpdateDto) -> SchoolResult<TeacherReadOnlyDto>;

    /// Deletes a teacher. Missing teachers are ignored.
    async fn delete_teacher(&self, id: TeacherId) -> SchoolResult<()>;

    /// Gets a teacher by ID.
    async fn get_teacher(&self, id: TeacherId) -> SchoolResult<TeacherReadOnlyDto>;

    /// Lists every teacher.
    async fn get_all_teachers(&self) -> SchoolResult<Vec<TeacherReadOnlyDto>>;

    /// Lists teachers matching the filters.
    async fn get_filtered_teachers(
        &self,
        filters: &TeacherFiltersDto,
    ) -> SchoolResult<Vec<TeacherReadOnlyDto>>;

    /// Returns one page of matching teachers with the total match count.
    async fn get_paginated_teachers(
        &self,
        filters: &TeacherFiltersDto,
        page: Option<u32>,
        size: Option<u32>,
    ) -> SchoolResult<Page<TeacherReadOnlyDto>>;

    /// Counts teachers matching the filters.
    async fn count_filtered_teachers(&self, filters: &TeacherFiltersDto) -> SchoolResult<u64>;
}
