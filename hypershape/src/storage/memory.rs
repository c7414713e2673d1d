//! In-memory record source

use std::cmp::Ordering;

use serde_json::Value;

use crate::mapping::SourceShape;
use crate::sorting::{SortDirection, SortKey};

use super::error::{StorageError, StorageOperation};
use super::query::{FilterCondition, FilterOperator, QuerySpec};
use super::traits::{RecordSource, StorageResult};

/// Read-only record source over a vector of source records
///
/// Filters and ordering are evaluated through [`SourceShape::property`];
/// records are projected into the output type with `From<&S>` only after the
/// window is applied.
#[derive(Debug, Clone)]
pub struct MemoryStore<S> {
    records: Vec<S>,
}

impl<S: SourceShape> MemoryStore<S> {
    /// Create a store holding the given records
    pub fn new(records: Vec<S>) -> Self {
        Self { records }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn check_paths(&self, operation: StorageOperation, query: &QuerySpec) -> StorageResult<()> {
        let known = S::property_paths();
        let mut fields: Vec<&str> = Vec::new();
        for condition in &query.filters {
            collect_fields(condition, &mut fields);
        }
        fields.extend(query.ordering.iter().map(|key| key.path));

        match fields
            .into_iter()
            .find(|field| !known.iter().any(|path| path == field))
        {
            Some(unknown) => Err(StorageError::invalid_query(
                operation,
                format!("unknown property path '{}'", unknown),
            )
            .with_entity(S::TYPE_NAME, "*")),
            None => Ok(()),
        }
    }

    fn matching(&self, filters: &[FilterCondition]) -> Vec<&S> {
        self.records
            .iter()
            .filter(|record| filters.iter().all(|condition| matches(*record, condition)))
            .collect()
    }
}

fn collect_fields<'q>(condition: &'q FilterCondition, out: &mut Vec<&'q str>) {
    match condition {
        FilterCondition::Compare { field, .. } => out.push(field),
        FilterCondition::AnyOf(members) => {
            for member in members {
                collect_fields(member, out);
            }
        }
    }
}

fn matches<S: SourceShape>(record: &S, condition: &FilterCondition) -> bool {
    match condition {
        FilterCondition::AnyOf(members) => members.iter().any(|m| matches(record, m)),
        FilterCondition::Compare {
            field,
            operator,
            value,
        } => {
            let actual = record.property(field).unwrap_or(Value::Null);
            let expected = value.to_json();
            match operator {
                FilterOperator::Equal => values_equal(&actual, &expected),
                FilterOperator::NotEqual => !values_equal(&actual, &expected),
                FilterOperator::GreaterThan => compare_values(&actual, &expected).is_gt(),
                FilterOperator::LessThan => compare_values(&actual, &expected).is_lt(),
                FilterOperator::Contains => match (actual.as_str(), expected.as_str()) {
                    (Some(haystack), Some(needle)) => haystack
                        .to_lowercase()
                        .contains(&needle.to_lowercase()),
                    _ => false,
                },
                FilterOperator::In => match &expected {
                    Value::Array(candidates) => {
                        candidates.iter().any(|c| values_equal(&actual, c))
                    }
                    other => values_equal(&actual, other),
                },
            }
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.eq_ignore_ascii_case(b),
        _ => compare_values(a, b).is_eq(),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values
///
/// Values of different kinds order null < bool < number < string < array <
/// object, so missing properties sort first ascending.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a
                .as_f64()
                .unwrap_or(f64::NAN)
                .total_cmp(&b.as_f64().unwrap_or(f64::NAN)),
        },
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_by_keys(a: &[Value], b: &[Value], ordering: &[SortKey]) -> Ordering {
    for ((left, right), key) in a.iter().zip(b).zip(ordering) {
        let ordering = match key.direction {
            SortDirection::Asc => compare_values(left, right),
            SortDirection::Desc => compare_values(right, left),
        };
        if ordering.is_ne() {
            return ordering;
        }
    }
    Ordering::Equal
}

fn identity_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<S, O> RecordSource<O> for MemoryStore<S>
where
    S: SourceShape + Send + Sync,
    O: for<'a> From<&'a S> + Send,
{
    async fn count(&self, query: &QuerySpec) -> StorageResult<u64> {
        self.check_paths(StorageOperation::Count, query)?;
        Ok(self.matching(&query.filters).len() as u64)
    }

    async fn fetch(&self, query: &QuerySpec) -> StorageResult<Vec<O>> {
        self.check_paths(StorageOperation::Fetch, query)?;

        let mut keyed: Vec<(Vec<Value>, &S)> = self
            .matching(&query.filters)
            .into_iter()
            .map(|record| {
                let keys = query
                    .ordering
                    .iter()
                    .map(|key| record.property(key.path).unwrap_or(Value::Null))
                    .collect();
                (keys, record)
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare_by_keys(a, b, &query.ordering));

        let (offset, limit) = match query.window {
            Some(window) => (
                usize::try_from(window.offset).unwrap_or(usize::MAX),
                usize::try_from(window.limit).unwrap_or(usize::MAX),
            ),
            None => (0, usize::MAX),
        };

        Ok(keyed
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, record)| O::from(record))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<O>> {
        Ok(self
            .records
            .iter()
            .find(|record| {
                record
                    .property(S::IDENTITY_PATH)
                    .is_some_and(|value| identity_key(&value) == id)
            })
            .map(O::from))
    }
}
