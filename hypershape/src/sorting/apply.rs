//! Applying a resolved plan to a query description

use super::resolver::{ResolvedSortPlan, SortKey};

/// A query description that can be ordered without materializing it
///
/// `order_by` replaces any previous ordering with a primary key;
/// `then_by` adds a secondary key after the existing ones.
pub trait OrderedQuery: Sized {
    /// Set the primary ordering key
    fn order_by(self, key: &SortKey) -> Self;

    /// Append a secondary ordering key
    fn then_by(self, key: &SortKey) -> Self;
}

/// Apply every key of the plan in order, tie-breaker last
pub fn apply_sort<Q: OrderedQuery>(query: Q, plan: &ResolvedSortPlan) -> Q {
    let mut keys = plan.keys().iter();
    let query = match keys.next() {
        Some(primary) => query.order_by(primary),
        None => query,
    };
    keys.fold(query, |query, key| query.then_by(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingTable;
    use crate::sorting::{resolve_sort, SortDirection};

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl OrderedQuery for Recorder {
        fn order_by(mut self, key: &SortKey) -> Self {
            self.calls.push(format!("order_by {}", key));
            self
        }

        fn then_by(mut self, key: &SortKey) -> Self {
            self.calls.push(format!("then_by {}", key));
            self
        }
    }

    #[test]
    fn test_primary_then_secondary_keys() {
        let table = MappingTable::new()
            .map("name", &["name"])
            .map("status", &["type", "status"])
            .with_identity("id");
        let plan = resolve_sort(Some("name desc,status"), &table).unwrap();

        let recorded = apply_sort(Recorder::default(), &plan);
        assert_eq!(
            recorded.calls,
            vec![
                "order_by name desc",
                "then_by type asc",
                "then_by status asc",
                "then_by id asc",
            ]
        );
    }

    #[test]
    fn test_tie_breaker_only_plan() {
        let table = MappingTable::new().map("name", &["name"]).with_identity("id");
        let plan = resolve_sort(None, &table).unwrap();

        let recorded = apply_sort(Recorder::default(), &plan);
        assert_eq!(recorded.calls, vec!["order_by id asc"]);
        assert_eq!(plan.primary().direction, SortDirection::Asc);
    }
}
