//! SQLite implementation of [`GenericDao`] for any [`PersistentEntity`].

use crate::criteria::{FilterPlan, ROOT_ALIAS};
use crate::schema::EntitySchema;
use crate::{Criteria, DatabasePoolInterface, GenericDao, MatchMode, PersistentEntity, Value};
use async_trait::async_trait;
use schoolapp_core::{PageRequest, SchoolError, SchoolResult};
use sqlx::{QueryBuilder, Sqlite};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// Generic SQLite DAO.
///
/// Holds no state besides the pool handle, so instances are cheap to create
/// per call site.
pub struct SqliteDao<T> {
    pool: Arc<dyn DatabasePoolInterface>,
    match_mode: MatchMode,
    _entity: PhantomData<fn() -> T>,
}

impl<T: PersistentEntity> SqliteDao<T> {
    /// Creates a DAO without checking the entity schema.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            pool,
            match_mode: MatchMode::default(),
            _entity: PhantomData,
        }
    }

    /// Creates a DAO after validating the entity schema.
    pub fn try_new(pool: Arc<dyn DatabasePoolInterface>) -> SchoolResult<Self> {
        T::schema().validate()?;
        Ok(Self::new(pool))
    }

    /// Sets how filter values are compared.
    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Returns the active match mode.
    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    fn schema() -> &'static EntitySchema {
        T::schema()
    }

    fn select() -> QueryBuilder<'static, Sqlite> {
        QueryBuilder::new(format!("SELECT {}", Self::schema().select_columns(ROOT_ALIAS)))
    }

    fn push_order(qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(format!(" ORDER BY {}.{}", ROOT_ALIAS, Self::schema().id_column));
    }

    /// Column values of `entity`, one per schema field.
    fn column_values(entity: &T) -> SchoolResult<Vec<Value>> {
        let schema = Self::schema();
        let values = entity.values();
        if values.len() != schema.fields.len() {
            return Err(SchoolError::internal(format!(
                "{} produced {} values for {} fields",
                schema.entity,
                values.len(),
                schema.fields.len()
            )));
        }
        Ok(values)
    }

    fn decode(rows: Vec<T::Row>) -> SchoolResult<Vec<T>> {
        rows.into_iter().map(T::from_row).collect()
    }
}

fn push_values(qb: &mut QueryBuilder<'_, Sqlite>, values: &[Value]) {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        value.push_bind(qb);
    }
}

#[async_trait]
impl<T: PersistentEntity> GenericDao<T> for SqliteDao<T> {
    async fn insert(&self, entity: T) -> SchoolResult<T> {
        let schema = Self::schema();
        debug!("Inserting {}", schema.entity);

        let fields = Self::column_values(&entity)?;
        let mut columns: Vec<&str> = Vec::with_capacity(schema.fields.len() + 1);
        let mut values = Vec::with_capacity(schema.fields.len() + 1);
        if let Some(id) = entity.id() {
            columns.push(schema.id_column);
            values.push(Value::Integer(id.into()));
        }
        columns.extend(schema.fields.iter().map(|f| f.column));
        values.extend(fields);

        let mut qb = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {}", schema.table));
        if columns.is_empty() {
            qb.push(" DEFAULT VALUES");
        } else {
            qb.push(format!(" ({}) VALUES (", columns.join(", ")));
            push_values(&mut qb, &values);
            qb.push(")");
        }

        let mut tx = self.pool.begin().await?;
        let result = qb.build().execute(&mut *tx).await?;
        tx.commit().await?;

        let id = entity
            .id()
            .unwrap_or_else(|| T::Id::from(result.last_insert_rowid()));
        info!("{} inserted with id {}", schema.entity, id);
        Ok(entity.with_id(id))
    }

    async fn update(&self, entity: T) -> SchoolResult<T> {
        let schema = Self::schema();
        let id = entity.id().ok_or_else(|| {
            SchoolError::validation(format!("Cannot update {} without an id", schema.entity))
        })?;
        debug!("Updating {} with id {}", schema.entity, id);

        let values = Self::column_values(&entity)?;

        if schema.fields.is_empty() {
            return match self.get_by_id(id).await? {
                Some(_) => Ok(entity),
                None => Err(SchoolError::not_found(schema.entity, id)),
            };
        }

        let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", schema.table));
        for (i, (field, value)) in schema.fields.iter().zip(values).enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(format!("{} = ", field.column));
            value.push_bind(&mut qb);
        }
        qb.push(format!(" WHERE {} = ", schema.id_column));
        qb.push_bind(Into::<i64>::into(id));

        let mut tx = self.pool.begin().await?;
        let result = qb.build().execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(SchoolError::not_found(schema.entity, id));
        }
        tx.commit().await?;

        info!("{} {} updated", schema.entity, id);
        Ok(entity)
    }

    async fn delete(&self, id: T::Id) -> SchoolResult<()> {
        let schema = Self::schema();
        debug!("Deleting {} with id {}", schema.entity, id);

        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "DELETE FROM {} WHERE {} = ",
            schema.table, schema.id_column
        ));
        qb.push_bind(Into::<i64>::into(id));

        let mut tx = self.pool.begin().await?;
        let result = qb.build().execute(&mut *tx).await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            debug!("{} {} did not exist, nothing deleted", schema.entity, id);
        } else {
            info!("{} {} deleted", schema.entity, id);
        }
        Ok(())
    }

    async fn get_by_id(&self, id: T::Id) -> SchoolResult<Option<T>> {
        let schema = Self::schema();
        debug!("Finding {} by id: {}", schema.entity, id);

        let mut qb = Self::select();
        qb.push(format!(
            " FROM {} AS {alias} WHERE {alias}.{} = ",
            schema.table,
            schema.id_column,
            alias = ROOT_ALIAS
        ));
        qb.push_bind(Into::<i64>::into(id));

        let row = qb
            .build_query_as::<T::Row>()
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(T::from_row).transpose()
    }

    async fn count(&self) -> SchoolResult<u64> {
        self.get_count_by_criteria(&Criteria::new()).await
    }

    async fn get_count_by_criteria(&self, criteria: &Criteria) -> SchoolResult<u64> {
        debug!("Counting {} by {:?}", Self::schema().entity, criteria);

        let plan = FilterPlan::build(Self::schema(), criteria, self.match_mode)?;
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*)");
        plan.push_from_where(&mut qb);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn get_all(&self) -> SchoolResult<Vec<T>> {
        self.get_by_criteria(&Criteria::new()).await
    }

    async fn get_by_criteria(&self, criteria: &Criteria) -> SchoolResult<Vec<T>> {
        self.get_by_criteria_paginated(criteria, None, None).await
    }

    async fn get_by_criteria_paginated(
        &self,
        criteria: &Criteria,
        page: Option<u32>,
        size: Option<u32>,
    ) -> SchoolResult<Vec<T>> {
        debug!(
            "Finding {} by {:?} (page: {:?}, size: {:?})",
            Self::schema().entity,
            criteria,
            page,
            size
        );

        let plan = FilterPlan::build(Self::schema(), criteria, self.match_mode)?;
        let mut qb = Self::select();
        plan.push_from_where(&mut qb);
        Self::push_order(&mut qb);

        if let Some(request) = PageRequest::from_parts(page, size) {
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(request.limit()));
            qb.push(" OFFSET ");
            qb.push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));
        }

        let rows = qb
            .build_query_as::<T::Row>()
            .fetch_all(self.pool.inner())
            .await?;

        Self::decode(rows)
    }

    async fn find_by_field(&self, field: &str, value: Value) -> SchoolResult<Option<T>> {
        let schema = Self::schema();
        debug!("Finding {} by {} = {:?}", schema.entity, field, value);

        let (column, kind) = schema
            .leaf(field)
            .ok_or_else(|| SchoolError::invalid_path(schema.entity, field))?;
        let value = value.coerce(kind).ok_or_else(|| {
            SchoolError::validation(format!(
                "{} field '{}' expects {:?}, got {:?}",
                schema.entity, field, kind, value
            ))
        })?;

        let mut qb = Self::select();
        qb.push(format!(
            " FROM {} AS {alias} WHERE {alias}.{}",
            schema.table,
            column,
            alias = ROOT_ALIAS
        ));
        if value.is_null() {
            qb.push(" IS NULL");
        } else {
            qb.push(" = ");
            value.push_bind(&mut qb);
        }
        Self::push_order(&mut qb);
        qb.push(" LIMIT 1");

        let row = qb
            .build_query_as::<T::Row>()
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(T::from_row).transpose()
    }
}

impl<T> std::fmt::Debug for SqliteDao<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDao")
            .field("entity", &std::any::type_name::<T>())
            .field("match_mode", &self.match_mode)
            .finish()
    }
}
