//! SQLite TeacherDao implementation.

use crate::{Criteria, DatabasePoolInterface, GenericDao, SqliteDao, TeacherDao, Value};
use async_trait::async_trait;
use schoolapp_core::{SchoolResult, Teacher, TeacherId};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// SQLite-backed teacher DAO.
///
/// Every operation delegates to a [`SqliteDao<Teacher>`] over the injected
/// pool.
#[derive(Component)]
#[shaku(interface = TeacherDao)]
pub struct SqliteTeacherDao {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteTeacherDao {
    /// Creates a new teacher DAO.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    fn dao(&self) -> SqliteDao<Teacher> {
        SqliteDao::new(Arc::clone(&self.pool))
    }
}

#[async_trait]
impl GenericDao<Teacher> for SqliteTeacherDao {
    async fn insert(&self, teacher: Teacher) -> SchoolResult<Teacher> {
        self.dao().insert(teacher).await
    }

    async fn update(&self, teacher: Teacher) -> SchoolResult<Teacher> {
        self.dao().update(teacher).await
    }

    async fn delete(&self, id: TeacherId) -> SchoolResult<()> {
        self.dao().delete(id).await
    }

    async fn get_by_id(&self, id: TeacherId) -> SchoolResult<Option<Teacher>> {
        self.dao().get_by_id(id).await
    }

    async fn count(&self) -> SchoolResult<u64> {
        self.dao().count().await
    }

    async fn get_count_by_criteria(&self, criteria: &Criteria) -> SchoolResult<u64> {
        self.dao().get_count_by_criteria(criteria).await
    }

    async fn get_all(&self) -> SchoolResult<Vec<Teacher>> {
        self.dao().get_all().await
    }

    async fn get_by_criteria(&self, criteria: &Criteria) -> SchoolResult<Vec<Teacher>> {
        self.dao().get_by_criteria(criteria).await
    }

    async fn get_by_criteria_paginated(
        &self,
        criteria: &Criteria,
        page: Option<u32>,
        size: Option<u32>,
    ) -> SchoolResult<Vec<Teacher>> {
        self.dao().get_by_criteria_paginated(criteria, page, size).await
    }

    async fn find_by_field(&self, field: &str, value: Value) -> SchoolResult<Option<Teacher>> {
        self.dao().find_by_field(field, value).await
    }
}

#[async_trait]
impl TeacherDao for SqliteTeacherDao {
    async fn find_by_vat(&self, vat: &str) -> SchoolResult<Option<Teacher>> {
        debug!("Finding teacher by vat: {}", vat);
        self.dao().find_by_field("vat", Value::from(vat)).await
    }
}
