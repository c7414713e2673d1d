//! Storage collaborator seam
//!
//! The pipeline never touches storage mechanics. It hands a [`QuerySpec`]
//! (filters, ordering, page window) to a [`RecordSource`] and gets back
//! records already projected into the output type, plus a count.
//!
//! [`MemoryStore`] is an in-process source over any [`SourceShape`](crate::mapping::SourceShape)
//! record, used by the reference service and by tests.

mod error;
mod memory;
mod query;
mod traits;

pub use error::{StorageError, StorageErrorKind, StorageOperation};
pub use memory::{compare_values, MemoryStore};
pub use query::{FilterCondition, FilterOperator, FilterValue, QuerySpec};
pub use traits::{RecordSource, StorageResult};
