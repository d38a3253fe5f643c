//! Dotted path resolution against entity schemas.

use crate::schema::{EntitySchema, FieldKind};
use schoolapp_core::{SchoolError, SchoolResult};
use sqlx::{QueryBuilder, Sqlite};

/// Alias of the root entity's table in generated queries.
pub(crate) const ROOT_ALIAS: &str = "e";

/// A field path resolved to a qualified column.
#[derive(Debug, Clone)]
pub struct ResolvedColumn {
    /// Table alias owning the column.
    pub alias: String,
    /// Column name.
    pub column: &'static str,
    /// Kind of the leaf field.
    pub kind: FieldKind,
}

impl ResolvedColumn {
    /// Returns `alias.column`.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.alias, self.column)
    }
}

#[derive(Debug)]
struct Join {
    /// Dotted relation prefix this join was created for.
    prefix: String,
    alias: String,
    table: &'static str,
    id_column: &'static str,
    parent_alias: String,
    foreign_key: &'static str,
}

/// Joins needed by a set of resolved paths.
#[derive(Debug)]
pub(crate) struct JoinPlan {
    root: &'static EntitySchema,
    joins: Vec<Join>,
}

impl JoinPlan {
    pub(crate) fn new(root: &'static EntitySchema) -> Self {
        Self { root, joins: Vec::new() }
    }

    /// Resolves `path`, registering any joins its relation segments need.
    pub(crate) fn resolve(&mut self, path: &str) -> SchoolResult<ResolvedColumn> {
        let entity = self.root.entity;
        let invalid = || SchoolError::invalid_path(entity, path);

        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid());
        }

        let mut schema = self.root;
        let mut alias = ROOT_ALIAS.to_string();
        let last = segments.len() - 1;

        for (i, segment) in segments.iter().enumerate() {
            if i == last {
                let (column, kind) = schema.leaf(segment).ok_or_else(invalid)?;
                return Ok(ResolvedColumn {
                    alias,
                    column,
                    kind,
                });
            }

            let field = schema.field(segment).ok_or_else(invalid)?;
            let target = field.kind.target().ok_or_else(invalid)?;

            // `relation.<id>` is the foreign key itself; no join needed.
            if i + 1 == last && segments[last] == target.id_field {
                return Ok(ResolvedColumn {
                    alias,
                    column: field.column,
                    kind: FieldKind::Integer,
                });
            }

            let prefix = segments[..=i].join(".");
            alias = self.join_for(prefix, target, alias, field.column);
            schema = target;
        }

        Err(invalid())
    }

    fn join_for(
        &mut self,
        prefix: String,
        target: &'static EntitySchema,
        parent_alias: String,
        foreign_key: &'static str,
    ) -> String {
        if let Some(join) = self.joins.iter().find(|j| j.prefix == prefix) {
            return join.alias.clone();
        }
        let alias = format!("j{}", self.joins.len() + 1);
        self.joins.push(Join {
            prefix,
            alias: alias.clone(),
            table: target.table,
            id_column: target.id_column,
            parent_alias,
            foreign_key,
        });
        alias
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.joins.len()
    }

    /// Pushes ` FROM <table> AS e` and every `LEFT JOIN`.
    pub(crate) fn push_from(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(format!(" FROM {} AS {}", self.root.table, ROOT_ALIAS));
        for join in &self.joins {
            qb.push(format!(
                " LEFT JOIN {table} AS {alias} ON {alias}.{id} = {parent}.{fk}",
                table = join.table,
                alias = join.alias,
                id = join.id_column,
                parent = join.parent_alias,
                fk = join.foreign_key,
            ));
        }
    }
}
