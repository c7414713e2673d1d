//! Query specification handed to record sources
//!
//! A [`QuerySpec`] is the storage-facing result of request processing:
//! filters in source-path terms, the resolved ordering, and the page window.
//! Sources translate it into whatever their backend speaks.
//!
//! # Example
//!
//! ```rust
//! use hypershape::pagination::PageWindow;
//! use hypershape::storage::{FilterCondition, QuerySpec};
//!
//! let spec = QuerySpec::new()
//!     .with_filter(FilterCondition::eq("status", "ongoing"))
//!     .with_filter(FilterCondition::search(&["name", "description"], "read"))
//!     .with_window(PageWindow::new(20, 10));
//!
//! assert_eq!(spec.filters.len(), 2);
//! assert_eq!(spec.window.map(|w| w.offset), Some(20));
//! ```

use std::fmt;

use serde_json::Value;

use crate::pagination::PageWindow;
use crate::sorting::{OrderedQuery, SortKey};

/// Filter operators for query conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Not equal to (!=)
    NotEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
    /// Case-insensitive substring match
    Contains,
    /// Value is one of a list
    In,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::NotEqual => write!(f, "!="),
            Self::GreaterThan => write!(f, ">"),
            Self::LessThan => write!(f, "<"),
            Self::Contains => write!(f, "CONTAINS"),
            Self::In => write!(f, "IN"),
        }
    }
}

/// Values that can be used in filter conditions
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// String value
    String(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// List of strings (for IN operator)
    StringList(Vec<String>),
}

impl FilterValue {
    /// JSON form used when comparing against source properties
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(n) => Value::from(*n),
            Self::Float(n) => Value::from(*n),
            Self::Boolean(b) => Value::Bool(*b),
            Self::StringList(list) => {
                Value::Array(list.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(list: Vec<String>) -> Self {
        Self::StringList(list)
    }
}

/// A filter over source property paths
///
/// Top-level conditions in a [`QuerySpec`] are combined with AND; the members
/// of an [`AnyOf`](FilterCondition::AnyOf) group are combined with OR.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// Compare one source property against a value
    Compare {
        /// Source property path
        field: String,
        /// Comparison operator
        operator: FilterOperator,
        /// Value to compare against
        value: FilterValue,
    },
    /// Matches when any member matches
    AnyOf(Vec<FilterCondition>),
}

impl FilterCondition {
    /// Create a condition with an explicit operator
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: FilterValue) -> Self {
        Self::Compare {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality condition
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Equal, value.into())
    }

    /// Create a not-equal condition
    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::NotEqual, value.into())
    }

    /// Create a case-insensitive substring condition
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, FilterValue::String(needle.into()))
    }

    /// Create an IN condition over string values
    pub fn in_strings(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, FilterOperator::In, FilterValue::StringList(values))
    }

    /// Free-text search: the term appears in any of the given fields
    pub fn search(fields: &[&str], term: impl Into<String>) -> Self {
        let term = term.into();
        Self::AnyOf(
            fields
                .iter()
                .map(|field| Self::contains(*field, term.clone()))
                .collect(),
        )
    }
}

/// Storage-facing description of one collection read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    /// Conditions combined with AND
    pub filters: Vec<FilterCondition>,
    /// Primary key first, tie-breakers after
    pub ordering: Vec<SortKey>,
    /// Page window; `None` reads every matching record
    pub window: Option<PageWindow>,
}

impl QuerySpec {
    /// Create an empty specification
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filters
    #[must_use]
    pub fn with_filters(mut self, filters: Vec<FilterCondition>) -> Self {
        self.filters = filters;
        self
    }

    /// Add one filter
    #[must_use]
    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.filters.push(filter);
        self
    }

    /// Restrict the read to one page
    #[must_use]
    pub fn with_window(mut self, window: PageWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Render the ordering as an SQL `ORDER BY` body, e.g. `name DESC, id ASC`
    ///
    /// Paths are emitted verbatim; sources with a different column naming
    /// scheme should translate `ordering` themselves.
    pub fn to_order_by_sql(&self) -> Option<String> {
        if self.ordering.is_empty() {
            return None;
        }
        Some(
            self.ordering
                .iter()
                .map(|key| format!("{} {}", key.path, key.direction.as_sql()))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl OrderedQuery for QuerySpec {
    fn order_by(mut self, key: &SortKey) -> Self {
        self.ordering.clear();
        self.ordering.push(*key);
        self
    }

    fn then_by(mut self, key: &SortKey) -> Self {
        self.ordering.push(*key);
        self
    }
}
