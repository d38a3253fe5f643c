//! Filter and column values.

use crate::schema::FieldKind;
use sqlx::{QueryBuilder, Sqlite};
use std::fmt;

/// A literal bound into a query, either as a filter or as a column value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// SQL `NULL`.
    Null,
    /// String value.
    Text(String),
    /// Integer value; also used for foreign keys.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
}

impl Value {
    /// Returns true for `Value::Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts the value to the representation stored for `kind`.
    ///
    /// Numeric and boolean strings are parsed; anything else that does not
    /// fit the field returns `None`. `Null` fits every kind.
    #[must_use]
    pub fn coerce(&self, kind: FieldKind) -> Option<Self> {
        match (kind, self) {
            (_, Self::Null) => Some(Self::Null),
            (FieldKind::Text, Self::Text(_)) => Some(self.clone()),
            (FieldKind::Text, Self::Integer(i)) => Some(Self::Text(i.to_string())),
            (FieldKind::Integer | FieldKind::Relation(_), Self::Integer(_)) => Some(self.clone()),
            (FieldKind::Integer | FieldKind::Relation(_), Self::Text(s)) => {
                s.trim().parse().ok().map(Self::Integer)
            }
            (FieldKind::Boolean, Self::Boolean(_)) => Some(self.clone()),
            (FieldKind::Boolean, Self::Integer(0)) => Some(Self::Boolean(false)),
            (FieldKind::Boolean, Self::Integer(1)) => Some(Self::Boolean(true)),
            (FieldKind::Boolean, Self::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(Self::Boolean(true)),
                "false" | "0" => Some(Self::Boolean(false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Binds the value as the next query parameter.
    pub(crate) fn push_bind(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            Self::Null => {
                qb.push_bind(None::<String>);
            }
            Self::Text(s) => {
                qb.push_bind(s.clone());
            }
            Self::Integer(i) => {
                qb.push_bind(*i);
            }
            Self::Boolean(b) => {
                qb.push_bind(*b);
            }
        }
    }

    /// Binds the value followed by a `%` wildcard, for prefix matching.
    pub(crate) fn push_bind_prefix(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push_bind(format!("{}%", self));
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Boolean(b) => f.write_str(if *b { "1" } else { "0" }),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from("abc"), Value::Text("abc".to_string()));
        assert_eq!(Value::from(7_i32), Value::Integer(7));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some(3_i64)), Value::Integer(3));
    }

    #[test]
    fn test_display_matches_stored_form() {
        assert_eq!(Value::Text("Ann".to_string()).to_string(), "Ann");
        assert_eq!(Value::Integer(-4).to_string(), "-4");
        assert_eq!(Value::Boolean(true).to_string(), "1");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_coerce_per_kind() {
        let text = |s: &str| Value::Text(s.to_string());

        assert_eq!(text(" 42 ").coerce(FieldKind::Integer), Some(Value::Integer(42)));
        assert_eq!(Value::Integer(7).coerce(FieldKind::Text), Some(text("7")));
        assert_eq!(text("TRUE").coerce(FieldKind::Boolean), Some(Value::Boolean(true)));
        assert_eq!(Value::Integer(0).coerce(FieldKind::Boolean), Some(Value::Boolean(false)));
        assert_eq!(Value::Null.coerce(FieldKind::Boolean), Some(Value::Null));

        assert_eq!(text("maybe").coerce(FieldKind::Boolean), None);
        assert_eq!(text("abc").coerce(FieldKind::Integer), None);
        assert_eq!(Value::Integer(2).coerce(FieldKind::Boolean), None);
        assert_eq!(Value::Boolean(true).coerce(FieldKind::Text), None);
        assert_eq!(Value::Boolean(true).coerce(FieldKind::Integer), None);
    }

    #[test]
    fn test_push_bind_emits_placeholder() {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT ");
        Value::Integer(1).push_bind(&mut qb);
        qb.push(", ");
        Value::Text("a".to_string()).push_bind_prefix(&mut qb);
        assert_eq!(qb.sql(), "SELECT ?, ?");
    }
}
