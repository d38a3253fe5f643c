//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use schoolapp_config::DatabaseConfig;
use schoolapp_core::Teacher;
use schoolapp_repository::{create_pool, DatabasePool, DatabasePoolInterface};
use std::sync::Arc;

/// Test database wrapper.
///
/// Every instance owns a private in-memory SQLite database with migrations
/// applied, so tests never see each other's rows.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh, migrated database.
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to create in-memory database");

        Self { pool }
    }

    /// Returns the pool as the injected interface.
    pub fn pool(&self) -> Arc<dyn DatabasePoolInterface> {
        Arc::clone(&self.pool) as Arc<dyn DatabasePoolInterface>
    }

    /// Runs raw DDL or DML against the database.
    pub async fn execute(&self, sql: &str) {
        sqlx::raw_sql(sql)
            .execute(self.pool.inner())
            .await
            .unwrap_or_else(|e| panic!("Failed to execute {sql}: {e}"));
    }
}

pub fn teacher(vat: &str, firstname: &str, lastname: &str) -> Teacher {
    Teacher::new(vat, firstname, lastname)
}
