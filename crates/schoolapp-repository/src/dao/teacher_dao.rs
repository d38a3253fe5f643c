//! TeacherDao trait.

use super::GenericDao;
use async_trait::async_trait;
use schoolapp_core::{Interface, SchoolResult, Teacher};

/// Teacher data access object.
#[async_trait]
pub trait TeacherDao: GenericDao<Teacher> + Interface {
    /// Finds a teacher by exact VAT number.
    async fn find_by_vat(&self, vat: &str) -> SchoolResult<Option<Teacher>>;
}
