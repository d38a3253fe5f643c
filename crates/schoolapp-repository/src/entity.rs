//! Persistence mapping for domain entities.

use crate::schema::EntitySchema;
use crate::Value;
use schoolapp_core::{Entity, SchoolResult};
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// An entity that can be stored by [`SqliteDao`](crate::SqliteDao).
///
/// Rows are selected as `id, <field columns...>` in schema order, decoded
/// into `Row` and converted with [`from_row`](Self::from_row).
pub trait PersistentEntity: Entity + Clone + Send + Sync + Unpin + 'static {
    /// Database row representation.
    type Row: for<'r> FromRow<'r, SqliteRow> + Send + Unpin;

    /// Returns the entity's table layout.
    fn schema() -> &'static EntitySchema;

    /// Returns the column values, one per schema field, in schema order.
    fn values(&self) -> Vec<Value>;

    /// Converts a decoded row into the entity.
    fn from_row(row: Self::Row) -> SchoolResult<Self>;
}
