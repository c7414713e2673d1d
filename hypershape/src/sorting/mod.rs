//! Sort expression resolution and application
//!
//! A request's `sort` parameter names output fields (`name desc,status`).
//! [`resolve_sort`] validates it against a [`MappingTable`](crate::mapping::MappingTable)
//! and flattens it into a [`ResolvedSortPlan`] of source paths, and
//! [`apply_sort`] lays that plan onto any [`OrderedQuery`].

mod apply;
mod resolver;

pub use apply::{apply_sort, OrderedQuery};
pub use resolver::{resolve_sort, ResolvedSortPlan, SortDirection, SortKey, SortTerm};
