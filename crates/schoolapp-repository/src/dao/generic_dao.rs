//! GenericDao trait: criteria-based data access for one entity type.

use crate::{Criteria, PersistentEntity, Value};
use async_trait::async_trait;
use schoolapp_core::SchoolResult;

/// Data access object for a persistent entity type.
///
/// Every write runs in its own transaction; reads borrow one pooled
/// connection. Results come back in ascending identity order.
#[async_trait]
pub trait GenericDao<T: PersistentEntity>: Send + Sync {
    /// Persists a new entity and returns it with its identity assigned.
    async fn insert(&self, entity: T) -> SchoolResult<T>;

    /// Overwrites the stored row with the entity's identity.
    ///
    /// Fails with `Validation` if the entity has no identity and with
    /// `NotFound` if no row has it.
    async fn update(&self, entity: T) -> SchoolResult<T>;

    /// Deletes the row with the given identity. Missing rows are ignored.
    async fn delete(&self, id: T::Id) -> SchoolResult<()>;

    /// Finds an entity by identity.
    async fn get_by_id(&self, id: T::Id) -> SchoolResult<Option<T>>;

    /// Counts all stored entities.
    async fn count(&self) -> SchoolResult<u64>;

    /// Counts entities matching every filter.
    async fn get_count_by_criteria(&self, criteria: &Criteria) -> SchoolResult<u64>;

    /// Returns all stored entities.
    async fn get_all(&self) -> SchoolResult<Vec<T>>;

    /// Returns every entity matching the criteria.
    async fn get_by_criteria(&self, criteria: &Criteria) -> SchoolResult<Vec<T>>;

    /// Returns one page of matching entities.
    ///
    /// Pagination applies only when both `page` (zero-based) and `size` are
    /// given; otherwise all matches are returned.
    async fn get_by_criteria_paginated(
        &self,
        criteria: &Criteria,
        page: Option<u32>,
        size: Option<u32>,
    ) -> SchoolResult<Vec<T>>;

    /// Returns the first entity whose top-level `field` equals `value`.
    async fn find_by_field(&self, field: &str, value: Value) -> SchoolResult<Option<T>>;
}
