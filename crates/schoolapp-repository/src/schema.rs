//! Static entity schemas.
//!
//! Each persistent entity describes its table once, as a `static`
//! [`EntitySchema`]. The criteria resolver walks these descriptions to turn
//! dotted field paths into joined, qualified column references.

use schoolapp_core::{SchoolError, SchoolResult};
use std::collections::HashSet;

/// The kind of value stored in a field.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// String column, filtered by prefix.
    Text,
    /// Integer column, filtered by equality.
    Integer,
    /// Boolean column, filtered by equality.
    Boolean,
    /// Many-to-one foreign key referencing the target schema's id column.
    Relation(fn() -> &'static EntitySchema),
}

impl FieldKind {
    /// Returns the target schema if this field is a relation.
    #[must_use]
    pub fn target(&self) -> Option<&'static EntitySchema> {
        match self {
            Self::Relation(target) => Some(target()),
            _ => None,
        }
    }

    /// Returns true for string-valued fields.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Integer => f.write_str("Integer"),
            Self::Boolean => f.write_str("Boolean"),
            Self::Relation(target) => write!(f, "Relation({})", target().entity),
        }
    }
}

/// A single mapped field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// Field name used in criteria paths.
    pub name: &'static str,
    /// Column name in the entity's table.
    pub column: &'static str,
    /// Value kind.
    pub kind: FieldKind,
}

impl FieldDef {
    /// Creates a text field.
    #[must_use]
    pub const fn text(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Text,
        }
    }

    /// Creates an integer field.
    #[must_use]
    pub const fn integer(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Integer,
        }
    }

    /// Creates a boolean field.
    #[must_use]
    pub const fn boolean(name: &'static str, column: &'static str) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Boolean,
        }
    }

    /// Creates a many-to-one relation stored in `column`.
    #[must_use]
    pub const fn relation(
        name: &'static str,
        column: &'static str,
        target: fn() -> &'static EntitySchema,
    ) -> Self {
        Self {
            name,
            column,
            kind: FieldKind::Relation(target),
        }
    }
}

/// Table layout of a persistent entity.
#[derive(Debug)]
pub struct EntitySchema {
    /// Entity name, used in error messages.
    pub entity: &'static str,
    /// Table name.
    pub table: &'static str,
    /// Identity column.
    pub id_column: &'static str,
    /// Name of the identity in criteria paths. Resolves as an integer leaf.
    pub id_field: &'static str,
    /// Mapped fields, in the order `PersistentEntity::values` returns them.
    pub fields: &'static [FieldDef],
}

impl EntitySchema {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a top-level leaf, the identity included, as `(column, kind)`.
    #[must_use]
    pub fn leaf(&self, name: &str) -> Option<(&'static str, FieldKind)> {
        if name == self.id_field {
            return Some((self.id_column, FieldKind::Integer));
        }
        self.field(name).map(|f| (f.column, f.kind))
    }

    /// Returns the column list for a select, qualified with `alias` and
    /// named after the bare column so rows decode by name.
    #[must_use]
    pub fn select_columns(&self, alias: &str) -> String {
        std::iter::once(self.id_column)
            .chain(self.fields.iter().map(|f| f.column))
            .map(|column| format!("{alias}.{column} AS {column}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Checks the schema and every schema reachable through its relations.
    pub fn validate(&'static self) -> SchoolResult<()> {
        let mut visited = HashSet::new();
        self.validate_inner(&mut visited)
    }

    fn validate_inner(&'static self, visited: &mut HashSet<&'static str>) -> SchoolResult<()> {
        if !visited.insert(self.table) {
            return Ok(());
        }

        let invalid = |message: String| {
            Err(SchoolError::Configuration(format!(
                "Invalid schema for {}: {}",
                self.entity, message
            )))
        };

        if self.table.is_empty() || self.id_column.is_empty() || self.id_field.is_empty() {
            return invalid("table, id column and id field must be named".to_string());
        }
        if self.id_field.contains('.') {
            return invalid(format!("id field '{}' must not contain '.'", self.id_field));
        }

        let mut names = HashSet::new();
        let mut columns = HashSet::new();
        for field in self.fields {
            if field.name.is_empty() || field.column.is_empty() {
                return invalid("field and column names must not be empty".to_string());
            }
            if field.name.contains('.') {
                return invalid(format!("field name '{}' must not contain '.'", field.name));
            }
            if field.column == self.id_column {
                return invalid(format!("field '{}' reuses the id column", field.name));
            }
            if field.name == self.id_field {
                return invalid(format!("field '{}' shadows the id field", field.name));
            }
            if !names.insert(field.name) {
                return invalid(format!("duplicate field '{}'", field.name));
            }
            if !columns.insert(field.column) {
                return invalid(format!("duplicate column '{}'", field.column));
            }
        }

        for field in self.fields {
            if let Some(target) = field.kind.target() {
                target.validate_inner(visited)?;
            }
        }

        Ok(())
    }
}
