//! Sort expression parsing and resolution
//!
//! # Example
//!
//! ```rust
//! use hypershape::mapping::MappingTable;
//! use hypershape::sorting::{resolve_sort, SortDirection, SortKey};
//!
//! let table = MappingTable::new()
//!     .map("name", &["name"])
//!     .map("status", &["type", "status"])
//!     .with_identity("id");
//!
//! let plan = resolve_sort(Some("name desc,status"), &table).unwrap();
//! assert_eq!(
//!     plan.keys(),
//!     &[
//!         SortKey::new("name", SortDirection::Desc),
//!         SortKey::new("type", SortDirection::Asc),
//!         SortKey::new("status", SortDirection::Asc),
//!         SortKey::new("id", SortDirection::Asc),
//!     ]
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapping::MappingTable;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Descending (Z-A, 9-0, newest first)
    Desc,
}

impl SortDirection {
    /// Parse a direction keyword, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// SQL `ORDER BY` keyword
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// One parsed token of a sort expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm {
    /// Output field name as the client wrote it
    pub field: String,
    /// Explicit direction, if the token carried one
    pub direction: Option<SortDirection>,
    /// Position of the token in the expression
    pub ordinal: usize,
}

impl SortTerm {
    /// Parse a sort expression into terms
    ///
    /// Empty tokens are skipped. A token is `field` or `field asc|desc`;
    /// anything else fails with [`Error::InvalidSortField`] carrying the token.
    pub fn parse_all(expression: &str) -> Result<Vec<SortTerm>> {
        let mut terms = Vec::new();
        for token in expression.split(',').map(str::trim) {
            if token.is_empty() {
                continue;
            }
            let mut parts = token.split_whitespace();
            let field = parts.next().unwrap_or_default();
            let direction = match parts.next() {
                None => None,
                Some(word) => Some(
                    SortDirection::parse(word)
                        .ok_or_else(|| Error::InvalidSortField(token.to_string()))?,
                ),
            };
            if parts.next().is_some() {
                return Err(Error::InvalidSortField(token.to_string()));
            }
            terms.push(SortTerm {
                field: field.to_string(),
                direction,
                ordinal: terms.len(),
            });
        }
        Ok(terms)
    }
}

/// A (source path, direction) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    /// Source property path
    pub path: &'static str,
    /// Direction for this key
    pub direction: SortDirection,
}

impl SortKey {
    /// Create a sort key
    pub const fn new(path: &'static str, direction: SortDirection) -> Self {
        Self { path, direction }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.direction)
    }
}

/// Ordered source keys for one request, tie-breaker last
///
/// Never empty: a request without sort terms resolves to the tie-breaker alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSortPlan {
    keys: Vec<SortKey>,
}

impl ResolvedSortPlan {
    /// Keys in application order
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Primary key (the first one applied)
    pub fn primary(&self) -> &SortKey {
        // keys always holds at least the tie-breaker
        &self.keys[0]
    }

    /// Number of keys, tie-breaker included
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the plan has no keys (never true once resolved)
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolve a sort expression against a mapping table
///
/// Each term expands to its entry's source paths in mapping order. A term
/// without a direction uses the entry's default. Repeated (path, direction)
/// pairs keep their first position. The identity path, ascending, is always
/// appended last unless it already ends the plan.
pub fn resolve_sort(expression: Option<&str>, table: &MappingTable) -> Result<ResolvedSortPlan> {
    let terms = match expression {
        Some(expression) => SortTerm::parse_all(expression)?,
        None => Vec::new(),
    };

    let mut keys: Vec<SortKey> = Vec::new();
    for term in &terms {
        let entry = table.entry(&term.field).ok_or_else(|| {
            tracing::warn!(field = %term.field, ordinal = term.ordinal, "unknown sort field");
            Error::InvalidSortField(term.field.clone())
        })?;
        let direction = term.direction.unwrap_or(entry.default_direction);
        for &path in &entry.source_paths {
            let key = SortKey::new(path, direction);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }

    let tie_breaker = SortKey::new(table.identity_path(), SortDirection::Asc);
    if keys.last() != Some(&tie_breaker) {
        keys.push(tie_breaker);
    }

    tracing::debug!(terms = terms.len(), keys = keys.len(), "resolved sort plan");
    Ok(ResolvedSortPlan { keys })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit_table() -> MappingTable {
        MappingTable::new()
            .map("name", &["name"])
            .map("description", &["description"])
            .map("status", &["type", "status"])
            .map_with_direction("createdAt", &["createdAtUtc"], SortDirection::Desc)
            .map("id", &["id"])
            .with_identity("id")
    }

    fn key(path: &'static str, direction: SortDirection) -> SortKey {
        SortKey::new(path, direction)
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("Desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("down"), None);
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn test_parse_terms_trims_and_skips_empty() {
        let terms = SortTerm::parse_all("  name desc , ,status  ,").unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].field, "name");
        assert_eq!(terms[0].direction, Some(SortDirection::Desc));
        assert_eq!(terms[0].ordinal, 0);
        assert_eq!(terms[1].field, "status");
        assert_eq!(terms[1].direction, None);
        assert_eq!(terms[1].ordinal, 1);
    }

    #[test]
    fn test_parse_terms_rejects_bad_direction() {
        let err = SortTerm::parse_all("name sideways").unwrap_err();
        assert!(matches!(err, Error::InvalidSortField(ref t) if t == "name sideways"));

        let err = SortTerm::parse_all("name desc extra").unwrap_err();
        assert!(matches!(err, Error::InvalidSortField(_)));
    }

    #[test]
    fn test_one_to_many_expansion_scenario() {
        let plan = resolve_sort(Some("name desc,status"), &habit_table()).unwrap();
        assert_eq!(
            plan.keys(),
            &[
                key("name", SortDirection::Desc),
                key("type", SortDirection::Asc),
                key("status", SortDirection::Asc),
                key("id", SortDirection::Asc),
            ]
        );
        assert_eq!(plan.primary(), &key("name", SortDirection::Desc));
    }

    #[test]
    fn test_empty_expression_is_tie_breaker_only() {
        let table = habit_table();
        for expression in [None, Some(""), Some("   "), Some(",,")] {
            let plan = resolve_sort(expression, &table).unwrap();
            assert_eq!(plan.keys(), &[key("id", SortDirection::Asc)]);
            assert!(!plan.is_empty());
        }
    }

    #[test]
    fn test_field_names_are_case_insensitive() {
        let plan = resolve_sort(Some("NAME DESC"), &habit_table()).unwrap();
        assert_eq!(plan.keys()[0], key("name", SortDirection::Desc));
    }

    #[test]
    fn test_unknown_field_fails_with_token() {
        let err = resolve_sort(Some("name,bogus desc"), &habit_table()).unwrap_err();
        assert!(matches!(err, Error::InvalidSortField(ref t) if t == "bogus"));
    }

    #[test]
    fn test_default_direction_applies_without_explicit_one() {
        let plan = resolve_sort(Some("createdAt"), &habit_table()).unwrap();
        assert_eq!(plan.keys()[0], key("createdAtUtc", SortDirection::Desc));

        let plan = resolve_sort(Some("createdAt asc"), &habit_table()).unwrap();
        assert_eq!(plan.keys()[0], key("createdAtUtc", SortDirection::Asc));
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let plan = resolve_sort(Some("status,name,status"), &habit_table()).unwrap();
        assert_eq!(
            plan.keys(),
            &[
                key("type", SortDirection::Asc),
                key("status", SortDirection::Asc),
                key("name", SortDirection::Asc),
                key("id", SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn test_same_path_other_direction_is_kept() {
        let plan = resolve_sort(Some("name,name desc"), &habit_table()).unwrap();
        assert_eq!(
            plan.keys(),
            &[
                key("name", SortDirection::Asc),
                key("name", SortDirection::Desc),
                key("id", SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn test_tie_breaker_always_last() {
        let table = habit_table();
        for expression in ["name", "id", "id desc", "id,name", "status desc,createdAt"] {
            let plan = resolve_sort(Some(expression), &table).unwrap();
            assert_eq!(plan.keys().last(), Some(&key("id", SortDirection::Asc)));
        }
    }

    #[test]
    fn test_explicit_identity_last_is_not_duplicated() {
        let plan = resolve_sort(Some("name,id"), &habit_table()).unwrap();
        assert_eq!(
            plan.keys(),
            &[key("name", SortDirection::Asc), key("id", SortDirection::Asc)]
        );
    }
}
