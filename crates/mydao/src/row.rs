//! Ordered column/value rows returned by the execution primitive.

use crate::value::Value;
use indexmap::IndexMap;

/// One result row: an insertion-ordered column to value mapping.
///
/// Column order matters — `scalar()` and `column()` read the first column
/// of each row, which is whatever the executor put there first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style. Useful for executors and fixtures.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Add or replace a column in place.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Value of the first column.
    pub fn first(&self) -> Option<&Value> {
        self.values.first().map(|(_, v)| v)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Columns and values in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_order_and_first() {
        let row = Row::new().set("name", "alice").set("id", 1);
        assert_eq!(row.first(), Some(&Value::from("alice")));
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["name", "id"]);
    }

    #[test]
    fn test_row_replace_keeps_position() {
        let mut row = Row::new().set("a", 1).set("b", 2);
        row.insert("a", 9);
        assert_eq!(row.first(), Some(&Value::Int(9)));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_from_iter() {
        let row: Row = [("id", 1), ("qty", 2)].into_iter().collect();
        assert_eq!(row.get("qty"), Some(&Value::Int(2)));
        assert!(!row.is_empty());
    }
}
