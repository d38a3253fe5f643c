//! Criteria maps and their translation into SQL filters.
//!
//! A [`Criteria`] maps dotted field paths (`"lastname"`, `"address.city"`)
//! to [`Value`]s. Every entry becomes one predicate; predicates are joined
//! with `AND`. Relation segments in a path turn into `LEFT JOIN`s, shared
//! between paths with a common prefix.

mod filter;
mod path;

pub(crate) use filter::FilterPlan;
pub(crate) use path::ROOT_ALIAS;

use crate::Value;
use std::collections::BTreeMap;

/// How filter values are compared against columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Text fields use prefix `LIKE`, everything else uses equality.
    #[default]
    Typed,
    /// Every field uses prefix `LIKE`, whatever its type.
    Prefix,
}

/// Mapping from field paths to filter values.
///
/// Keys are kept sorted so the generated SQL is stable for a given map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    filters: BTreeMap<String, Value>,
}

impl Criteria {
    /// Creates an empty criteria map, matching everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter and returns the map.
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(path, value);
        self
    }

    /// Adds a filter, returning the value it replaced.
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.filters.insert(path.into(), value.into())
    }

    /// Returns the filter for a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.filters.get(path)
    }

    /// Removes the filter for a path.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.filters.remove(path)
    }

    /// Returns true if a filter exists for the path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.filters.contains_key(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Iterates over `(path, value)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Self::new();
        for (path, value) in iter {
            criteria.insert(path, value);
        }
        criteria
    }
}

impl From<BTreeMap<String, Value>> for Criteria {
    fn from(filters: BTreeMap<String, Value>) -> Self {
        Self { filters }
    }
}
