//! Predicate generation for resolved criteria.

use super::path::{JoinPlan, ResolvedColumn};
use super::{Criteria, MatchMode};
use crate::schema::EntitySchema;
use crate::Value;
use schoolapp_core::{SchoolError, SchoolResult};
use sqlx::{QueryBuilder, Sqlite};

/// A criteria map resolved against a schema: the joins it needs and one
/// predicate per entry.
#[derive(Debug)]
pub(crate) struct FilterPlan {
    joins: JoinPlan,
    predicates: Vec<(ResolvedColumn, Value)>,
    mode: MatchMode,
}

impl FilterPlan {
    /// Resolves every path in `criteria`, failing on the first invalid one.
    ///
    /// In typed mode each value is coerced to its field kind; a value that
    /// does not fit is a `Validation` error.
    pub(crate) fn build(
        schema: &'static EntitySchema,
        criteria: &Criteria,
        mode: MatchMode,
    ) -> SchoolResult<Self> {
        let mut joins = JoinPlan::new(schema);
        let mut predicates = Vec::with_capacity(criteria.len());
        for (path, value) in criteria.iter() {
            let column = joins.resolve(path)?;
            let value = match mode {
                MatchMode::Prefix => value.clone(),
                MatchMode::Typed => value.coerce(column.kind).ok_or_else(|| {
                    SchoolError::validation(format!(
                        "{} filter '{}' expects {:?}, got {:?}",
                        schema.entity, path, column.kind, value
                    ))
                })?,
            };
            predicates.push((column, value));
        }
        Ok(Self {
            joins,
            predicates,
            mode,
        })
    }

    /// Pushes the `FROM`/`JOIN` clause followed by the `WHERE` clause.
    pub(crate) fn push_from_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        self.joins.push_from(qb);

        for (i, (column, value)) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            push_predicate(qb, column, value, self.mode);
        }
    }
}

fn push_predicate(
    qb: &mut QueryBuilder<'_, Sqlite>,
    column: &ResolvedColumn,
    value: &Value,
    mode: MatchMode,
) {
    qb.push(column.qualified());

    if value.is_null() {
        qb.push(" IS NULL");
        return;
    }

    let prefix_match = match mode {
        MatchMode::Prefix => true,
        MatchMode::Typed => column.kind.is_text(),
    };

    if prefix_match {
        qb.push(" LIKE ");
        value.push_bind_prefix(qb);
    } else {
        qb.push(" = ");
        value.push_bind(qb);
    }
}
