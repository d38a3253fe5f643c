//! Dependency injection module using Shaku.
//!
//! `SchoolModule` wires the database pool, the teacher DAO and the teacher
//! service for a single-process deployment.

use crate::{TeacherService, TeacherServiceImpl};
use schoolapp_config::{AppConfig, DatabaseConfig};
use schoolapp_core::{init_tracing, SchoolResult, Teacher};
use schoolapp_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, PersistentEntity,
    SqliteTeacherDao, TeacherDao,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

module! {
    pub SchoolModule {
        components = [
            DatabasePool,
            SqliteTeacherDao,
            TeacherServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the school module.
///
/// Connects to the database, applies migrations when configured and checks
/// every entity schema before any component is created.
pub async fn build_school_module(db_config: &DatabaseConfig) -> SchoolResult<Arc<SchoolModule>> {
    Teacher::schema().validate()?;

    let db_pool = DatabasePool::new(db_config).await?;
    if db_config.run_migrations {
        db_pool.run_migrations().await?;
    }

    let module = SchoolModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .build();

    Ok(Arc::new(module))
}

/// Installs tracing when enabled and builds the school module.
pub async fn bootstrap(config: &AppConfig) -> SchoolResult<Arc<SchoolModule>> {
    if config.telemetry.enabled {
        init_tracing(&config.telemetry)?;
    }

    info!(
        "Starting {} v{} ({})",
        config.app.name, config.app.version, config.app.environment
    );

    build_school_module(&config.database).await
}

/// Trait for resolving the school components from a module.
pub trait SchoolResolver {
    /// Resolves the teacher service.
    fn teacher_service(&self) -> Arc<dyn TeacherService>;

    /// Resolves the teacher DAO.
    fn teacher_dao(&self) -> Arc<dyn TeacherDao>;

    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl SchoolResolver for SchoolModule {
    fn teacher_service(&self) -> Arc<dyn TeacherService> {
        self.resolve()
    }

    fn teacher_dao(&self) -> Arc<dyn TeacherDao> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
